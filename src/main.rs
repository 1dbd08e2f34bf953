// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! calai command-line client
//!
//! Logs meals, water, exercise and weight against the nutrition backend and
//! prints results as JSON.

use anyhow::{bail, Context};
use calai_client::{
    config::Config,
    models::{ActivityLevel, BarcodeMeal, Gender, Goal, ImageUpload, NewExercise, Profile},
    services::{bmi, estimate_daily_calories, estimate_macros, BmiCategory},
    time_utils::parse_date_param,
    CalaiClient,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "calai")]
#[command(about = "AI calorie tracker client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override backend URL
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Acquire (or reuse) an anonymous session
    Session,

    /// Forget the stored session
    Logout,

    /// Check that the backend is reachable
    Ping,

    /// Daily totals
    Summary {
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Meals logged on a day
    Meals {
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Log a meal from a description, e.g. "2 eggs and toast"
    MealText { description: String },

    /// Log a meal from a photo
    MealImage { path: PathBuf },

    /// Log a packaged product by barcode
    MealBarcode {
        barcode: String,

        #[arg(long, default_value_t = 1)]
        servings: u32,

        /// Serving description, e.g. "1 bar"
        #[arg(long)]
        serving: Option<String>,
    },

    /// Log water in milliliters
    Water {
        amount_ml: u32,

        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Log an exercise session
    Exercise {
        name: String,

        /// Duration in minutes
        #[arg(long)]
        duration: u32,

        /// Calories burned
        #[arg(long)]
        calories: u32,

        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Log body weight in kilograms
    Weight {
        weight_kg: f64,

        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Search the food database
    Search { query: String },

    /// Estimate daily calories and macros (offline)
    Estimate {
        #[command(flatten)]
        body: BodyArgs,
    },

    /// Show the profile; with any option set, update and save it
    Profile {
        #[command(flatten)]
        body: OptionalBodyArgs,

        /// IANA timezone, e.g. "Europe/Berlin"
        #[arg(long)]
        timezone: Option<String>,
    },
}

#[derive(clap::Args)]
struct BodyArgs {
    #[arg(long)]
    age: u32,

    /// Height in centimeters
    #[arg(long)]
    height: f64,

    /// Weight in kilograms
    #[arg(long)]
    weight: f64,

    /// male, female or other
    #[arg(long)]
    gender: Option<Gender>,

    /// sedentary, light, moderate, active or very_active
    #[arg(long, default_value = "moderate")]
    activity: ActivityLevel,

    /// lose, maintain or gain
    #[arg(long, default_value = "maintain")]
    goal: Goal,
}

#[derive(clap::Args)]
struct OptionalBodyArgs {
    #[arg(long)]
    age: Option<u32>,

    #[arg(long)]
    height: Option<f64>,

    #[arg(long)]
    weight: Option<f64>,

    #[arg(long)]
    gender: Option<Gender>,

    #[arg(long)]
    activity: Option<ActivityLevel>,

    #[arg(long)]
    goal: Option<Goal>,
}

impl OptionalBodyArgs {
    fn is_empty(&self) -> bool {
        self.age.is_none()
            && self.height.is_none()
            && self.weight.is_none()
            && self.gender.is_none()
            && self.activity.is_none()
            && self.goal.is_none()
    }

    fn apply(self, profile: &mut Profile) {
        profile.age = self.age.or(profile.age);
        profile.height_cm = self.height.or(profile.height_cm);
        profile.weight_kg = self.weight.or(profile.weight_kg);
        profile.gender = self.gender.or(profile.gender);
        profile.activity_level = self.activity.unwrap_or(profile.activity_level);
        profile.goal = self.goal.unwrap_or(profile.goal);
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Estimate {
    daily_calories: u32,
    macros: calai_client::services::MacroTargets,
    bmi: Option<f64>,
    bmi_category: Option<&'static str>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(url) = cli.backend_url {
        config = Config::new(url, config.data_dir, config.request_timeout);
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    tracing::debug!(backend = %config.backend_url, "Using backend");
    let client = CalaiClient::from_config(&config)?;

    match cli.command {
        Commands::Session => {
            client.gateway.ensure_session().await?;
            let user_id = client.gateway.session().map(|s| s.user_id);
            print_json(&serde_json::json!({
                "backend": client.gateway.base_url(),
                "userId": user_id,
            }))
        }
        Commands::Logout => {
            client.gateway.logout();
            client.profile.clear_cache();
            print_json(&serde_json::json!({ "loggedOut": true }))
        }
        Commands::Ping => {
            if !client.gateway.ping().await {
                bail!("Backend at {} is not reachable", client.gateway.base_url());
            }
            print_json(&serde_json::json!({ "reachable": true }))
        }
        Commands::Summary { date } => print_json(&client.summary.day(date).await?),
        Commands::Meals { date } => print_json(&client.meals.list(date).await?),
        Commands::MealText { description } => {
            print_json(&client.meals.log_from_text(&description).await?)
        }
        Commands::MealImage { path } => {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "meal.jpg".to_string());
            let upload = ImageUpload::new(file_name, bytes);
            print_json(&client.meals.log_from_image(upload).await?)
        }
        Commands::MealBarcode {
            barcode,
            servings,
            serving,
        } => {
            let meal = BarcodeMeal {
                servings,
                serving_description: serving,
                ..BarcodeMeal::new(barcode)
            };
            print_json(&client.meals.log_from_barcode(meal).await?)
        }
        Commands::Water { amount_ml, date } => {
            print_json(&client.water.log(amount_ml, date).await?)
        }
        Commands::Exercise {
            name,
            duration,
            calories,
            date,
        } => {
            let exercise = NewExercise {
                name,
                duration_minutes: duration,
                calories_burned: calories,
                date,
            };
            print_json(&client.exercise.log(exercise).await?)
        }
        Commands::Weight { weight_kg, date } => {
            print_json(&client.weight.log(weight_kg, date).await?)
        }
        Commands::Search { query } => print_json(&client.foods.search(&query).await?),
        Commands::Profile { body, timezone } => {
            if body.is_empty() && timezone.is_none() {
                return print_json(&client.profile.load().await?);
            }
            let mut profile = client.profile.cached().unwrap_or_default();
            body.apply(&mut profile);
            if timezone.is_some() {
                profile.timezone = timezone;
            }
            print_json(&client.profile.save(profile).await?)
        }
        Commands::Estimate { body } => print_json(&estimate(body)),
    }
}

fn estimate(body: BodyArgs) -> Estimate {
    let profile = Profile {
        age: Some(body.age),
        height_cm: Some(body.height),
        weight_kg: Some(body.weight),
        gender: body.gender,
        activity_level: body.activity,
        goal: body.goal,
        ..Default::default()
    };
    let daily_calories = estimate_daily_calories(&profile);
    let bmi = bmi(body.weight, body.height);
    Estimate {
        daily_calories,
        macros: estimate_macros(daily_calories),
        bmi,
        bmi_category: bmi.map(|b| BmiCategory::from_bmi(b).label()),
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    parse_date_param(value).ok_or_else(|| format!("invalid date {:?}, expected YYYY-MM-DD", value))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initialize logging to stderr; JSON lines when `CALAI_LOG_JSON` is set.
fn init_logging() {
    let json = std::env::var("CALAI_LOG_JSON")
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
        .unwrap_or(false);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("calai_client=info,calai=info"));

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .with_current_span(true)
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}
