use clap::Parser;
use lorrgs_client::utils::error::ErrorSeverity;
use lorrgs_client::utils::{logger, validation::Validate};
use lorrgs_client::{CliConfig, Command, FightQuery, LorrgsClient, LorrgsError, RankingQuery};
use serde_json::Value;
use std::cell::Cell;

fn exit_code(e: &LorrgsError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: LorrgsError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e));
}

fn print_json(data: &Value) {
    match serde_json::to_string_pretty(data) {
        Ok(text) => println!("{}", text),
        Err(e) => tracing::error!("❌ Could not print payload: {}", e),
    }
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            logger::init_logger(cli.verbose, cli.log_format.unwrap_or_default());
            fail(e)
        }
    };

    logger::init_logger(settings.verbose, settings.log_format);
    tracing::debug!("Resolved settings: {:?}", settings);

    if let Err(e) = cli.command.validate() {
        fail(e);
    }

    let client = match LorrgsClient::from_config(&settings) {
        Ok(client) => client,
        Err(e) => fail(e),
    };

    match cli.command {
        Command::Fight {
            report_id,
            fight_id,
            spec,
        } => {
            let query = FightQuery::new(report_id, fight_id)
                .with_spec(spec.unwrap_or_else(|| settings.default_spec.clone()));
            let client = client.with_span(tracing::info_span!("fight", report = %query.report_id, fight = query.fight_id));

            let rendered = Cell::new(false);
            client
                .load_fight_data(&query, &|data: &Value, spec_slug: &str| {
                    tracing::info!("✅ Rendering fight for {}", spec_slug);
                    print_json(data);
                    rendered.set(true);
                })
                .await;

            if !rendered.get() {
                std::process::exit(2);
            }
        }
        Command::Spells { spec } => {
            let client = client.with_span(tracing::info_span!("spells", spec = %spec));
            print_json(&client.load_spell_data(&spec).await);
        }
        Command::Ranking { spec, boss } => {
            let query = RankingQuery::new(spec, boss);
            let client = client.with_span(tracing::info_span!("ranking", file = %query.file_name()));
            // a missing file prints `null`; it is not a failure
            print_json(&client.load_ranking_data(&query).await.unwrap_or(Value::Null));
        }
        Command::Boss { short_name } => {
            let client = client.with_span(tracing::info_span!("boss", short_name = %short_name));
            print_json(&client.load_boss_data(&short_name).await.unwrap_or(Value::Null));
        }
    }
}
