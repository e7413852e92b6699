//! Screen one student against a prepared artifact directory.
//!
//! ```text
//! cargo run --example screen_student -- [config.json] [gender age course year cgpa marital]
//! ```
//!
//! Without a config file the artifacts are read from `./artifacts`.

use mindscreen::{context, guidance, RawRecord, ScreeningConfig};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config, answers) = match args.first() {
        Some(path) if path.ends_with(".json") => match ScreeningConfig::from_file(path) {
            Ok(config) => (config, &args[1..]),
            Err(e) => {
                eprintln!("Failed to read config {}: {}", path, e);
                std::process::exit(2);
            }
        },
        _ => (ScreeningConfig::default(), &args[..]),
    };

    let record = match answers {
        [] => RawRecord::new("Female", 21, "Engineering", 2, 3.2, "Single"),
        [gender, age, course, year, cgpa, marital] => {
            let fields = [
                ("gender", gender),
                ("age", age),
                ("course", course),
                ("year_of_study", year),
                ("cgpa", cgpa),
                ("marital_status", marital),
            ];
            match RawRecord::from_fields(fields) {
                Ok(record) => record,
                Err(e) => {
                    eprintln!("{}", e);
                    eprintln!("{}", e.user_message());
                    std::process::exit(2);
                }
            }
        }
        _ => {
            eprintln!("expected six answers: gender age course year cgpa marital");
            std::process::exit(2);
        }
    };

    let assessment = match context::init(&config.artifacts).and_then(|ctx| ctx.assess(&record)) {
        Ok(assessment) => assessment,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    };

    println!("Risk levels");
    for (condition, result) in assessment.iter() {
        println!(
            "  {:<13} {:<9} ({:.0}%)",
            condition.name(),
            result.tier,
            result.probability * 100.0
        );
    }

    println!("\nKey recommendations");
    let policy = &config.recommendations;
    for (i, rec) in guidance::top_recommendations(&assessment, &record, policy)
        .iter()
        .enumerate()
    {
        println!("  {}. {}", i + 1, rec);
    }

    println!("\nDetailed analysis");
    for (condition, result) in assessment.iter() {
        println!("  {} ({})", condition, result.tier);
        println!("    {}", guidance::advice(condition, result.tier));
    }
}
