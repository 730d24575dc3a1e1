use crossterm::style::Stylize;
use pinyin_core::{
    resource, CaseStyle, OutputFormat, PinyinConfig, PinyinEngine, Segment, ToneStyle, VCharStyle,
};
use std::io::{self, stdin, stdout, Write};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pinyin_core=info,pinyin_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = PinyinConfig::from_env();
    let mut format = config.default_format;
    if resource::install(PinyinEngine::from_config(&config)).is_err() {
        warn!("pinyin engine was already initialized");
    }
    let engine = resource::global();
    if engine.is_empty() {
        warn!(data_dir = ?config.data_dir, "dictionary is empty, text will pass through unchanged");
    }

    println!("{}", "Hanyu Pinyin Engine. Type Chinese text, or 'exit' to quit.".bold());
    println!("---------------------------------------------------------------");
    print_help();

    loop {
        print!("\n> ");
        stdout().flush()?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let cmd = input.trim();

        match cmd {
            "exit" => break,
            "" => continue,
            ":help" => print_help(),
            s if s.starts_with(':') => match apply_command(s, format, engine) {
                Ok(next) => {
                    format = next;
                    println!("Format: {:?}", format);
                }
                Err(msg) => println!("{}", msg.red()),
            },
            text => print_conversion(engine, text, format),
        }
    }

    info!("shutting down");
    Ok(())
}

fn apply_command(cmd: &str, format: OutputFormat, engine: &PinyinEngine) -> Result<OutputFormat, String> {
    let mut parts = cmd[1..].split_whitespace();
    let name = parts.next().unwrap_or("");
    let arg = parts.next().unwrap_or("");

    match (name, arg) {
        ("tone", "number") => Ok(format.with_tone(ToneStyle::NumberSuffix)),
        ("tone", "mark") => Ok(format.with_tone(ToneStyle::DiacriticMark)),
        ("tone", "none") => Ok(format.with_tone(ToneStyle::NoTone)),
        ("case", "upper") => Ok(format.with_case(CaseStyle::Upper)),
        ("case", "lower") => Ok(format.with_case(CaseStyle::Lower)),
        ("v", "colon") => Ok(format.with_v_char(VCharStyle::UAndColon)),
        ("v", "v") => Ok(format.with_v_char(VCharStyle::LiteralV)),
        ("v", "unicode") => Ok(format.with_v_char(VCharStyle::UnicodeUDiaeresis)),
        ("snapshot", path) if !path.is_empty() => {
            engine
                .save_dictionary(Path::new(path))
                .map_err(|e| format!("Could not save snapshot: {}", e))?;
            println!("Snapshot written to '{}'", path);
            Ok(format)
        }
        _ => Err(format!("Unknown command '{}'. Try :help", cmd)),
    }
}

fn print_conversion(engine: &PinyinEngine, text: &str, format: OutputFormat) {
    println!("{} {}", "Pinyin:".green(), engine.to_pinyin_string(text, format, " "));

    for segment in engine.segment(text) {
        match segment {
            Segment::Phrase { text, readings } => {
                let shown: Vec<String> = readings
                    .iter()
                    .map(|r| pinyin_core::format_reading(r, format))
                    .collect();
                println!("  {} (phrase) -> {}", text, shown.join(" "));
            }
            Segment::Single { ch, candidates } if candidates.len() > 1 => {
                println!("  {} -> {}", ch, engine.candidates(ch, format).join(" | "));
            }
            Segment::Single { .. } | Segment::Unmapped(_) => {}
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  :tone number|mark|none   tone style");
    println!("  :case upper|lower        letter case");
    println!("  :v colon|v|unicode       how to write the u-umlaut vowel");
    println!("  :snapshot <path>         save the loaded dictionary");
}
