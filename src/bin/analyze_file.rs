use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context};
use proseprobe_lib::services::config_store::{AppConfig, ConfigStore};
use proseprobe_lib::services::detection::{DetectionSensitivity, Engine};

fn preview(s: &str, max_chars: usize) -> String {
    let mut out: String = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        out.push_str("...");
    }
    out.replace('\n', " ")
}

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

fn read_input(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("read stdin failed")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("read file failed: {}", path))
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage:\n  analyze_file <path.txt | -> [--sensitivity <low|medium|high>] [--sentences <n>] [--config <dir>] [--write-config] [--out <json_path>]\n\nNotes:\n  - `-` reads the text from stdin.\n  - `--write-config` saves the effective configuration (creating config.json if missing)."
        );
        return Ok(());
    }

    let path = args[1].clone();
    let sensitivity = DetectionSensitivity::from_option(parse_arg_value(&args, "--sensitivity").as_deref());
    let sentences_n: usize = parse_arg_value(&args, "--sentences")
        .and_then(|s| s.parse().ok())
        .unwrap_or(20);
    let out_path = parse_arg_value(&args, "--out");

    let store = match parse_arg_value(&args, "--config") {
        Some(dir) => Some(ConfigStore::new(PathBuf::from(dir))),
        None => ConfigStore::from_env(),
    };
    let config = match &store {
        Some(store) => store
            .load()
            .with_context(|| format!("failed to load {}", store.config_file().display()))?,
        None => AppConfig::default(),
    };

    if has_flag(&args, "--write-config") {
        let Some(store) = &store else {
            bail!("no config directory available; pass --config <dir>");
        };
        store.save(&config)?;
        println!("Wrote config: {}", store.config_file().display());
    }

    let text = read_input(&path)?;
    let engine = Engine::new(config.engine).context("invalid engine configuration")?;
    let report = engine.analyze_report(&text, sensitivity, &uuid::Uuid::new_v4().to_string())?;

    println!("File: {}", path);
    println!("Input: {} chars ({} bytes)", text.chars().count(), text.len());
    println!("Sensitivity: {:?}", sensitivity);
    println!(
        "Result: {} (ai={} human={})",
        report.result.label, report.result.ai_score, report.result.human_score
    );
    println!();

    println!("Sentences: {}", report.sentences.len());
    for (i, s) in report.sentences.iter().take(sentences_n).enumerate() {
        println!(
            "[S{:04}] bytes=[{},{}] words={} terminal={:?}  {}",
            i,
            s.start,
            s.end,
            s.words,
            s.terminal,
            preview(&text[s.start..s.end], 120)
        );
    }
    if report.sentences.len() > sentences_n {
        println!("... ({} more sentences)", report.sentences.len() - sentences_n);
    }
    println!();

    let json = serde_json::to_string_pretty(&report)?;
    match out_path {
        Some(out_path) => {
            std::fs::write(&out_path, json).with_context(|| format!("write out failed: {}", out_path))?;
            println!("Wrote JSON: {}", out_path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
