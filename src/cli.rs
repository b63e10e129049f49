//! Command-line interface for the `composer` binary

use clap::Parser;
use composer_dsp::config::LoadOptions;
use composer_dsp::features::tempo::TempoStrategy;
use composer_dsp::io::click_track::{write_click_track, DEFAULT_CLICK_FREQUENCY};
use composer_dsp::io::load_waveform;
use composer_dsp::library::Library;
use composer_dsp::{AnalysisConfig, KeyAnalyzer, TempoAnalyzer};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

type CliResult<T> = Result<T, Box<dyn Error>>;

const GREEN: &str = "\x1b[92m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const END: &str = "\x1b[0m";

#[derive(Parser, Debug)]
#[command(name = "composer", version, about = "Composer - a musical analysis tool")]
pub struct Cli {
    /// Estimate the key of a library file
    #[arg(short, long, value_name = "FILE")]
    pub key: Option<String>,

    /// Estimate the tempo (BPM) of a library file
    #[arg(short, long, value_name = "FILE")]
    pub tempo: Option<String>,

    /// List the files in the library
    #[arg(short, long)]
    pub list: bool,

    /// Copy an audio file into the library
    #[arg(short, long, value_name = "PATH")]
    pub add: Option<PathBuf>,

    /// Delete a file from the library
    #[arg(short, long, value_name = "FILE")]
    pub delete: Option<String>,

    /// Point the library at another directory
    #[arg(short, long, value_name = "DIR")]
    pub set: Option<PathBuf>,

    /// Tempo estimation strategy (naive or interval)
    #[arg(long, value_name = "STRATEGY")]
    pub strategy: Option<TempoStrategy>,

    /// Write the detected onsets as a click track (16-bit WAV)
    #[arg(long, value_name = "WAV")]
    pub click_track: Option<PathBuf>,

    /// Write the novelty function and its peaks as JSON
    #[arg(long, value_name = "JSON")]
    pub dump_novelty: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Analysis configuration file (JSON)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Library configuration file (default: platform config directory)
    #[arg(long, value_name = "PATH")]
    pub library_config: Option<PathBuf>,
}

/// Run every requested operation; returns false if any of them failed
pub fn run(cli: Cli) -> bool {
    let mut library = match open_library(&cli) {
        Ok(library) => library,
        Err(e) => {
            eprintln!("Error opening library: {}", e);
            return false;
        }
    };
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return false;
        }
    };

    let mut ok = true;
    let mut report = |result: CliResult<()>, what: &str| {
        if let Err(e) = result {
            eprintln!("Error {}: {}", what, e);
            ok = false;
        }
    };

    if cli.list {
        report(list(&library), "listing library");
    }
    if let Some(source) = &cli.add {
        report(add(&library, source), "adding file to library");
    }
    if let Some(name) = &cli.delete {
        report(delete(&library, name), "removing file from library");
    }
    if let Some(name) = &cli.tempo {
        report(tempo(&cli, &library, &config, name), "estimating tempo");
    }
    if let Some(name) = &cli.key {
        report(key(&cli, &library, &config, name), "estimating key");
    }
    if let Some(dir) = &cli.set {
        report(set(&mut library, dir), "setting library path");
    }

    ok
}

fn open_library(cli: &Cli) -> CliResult<Library> {
    Ok(match &cli.library_config {
        Some(path) => Library::open(path)?,
        None => Library::open_default()?,
    })
}

fn load_config(cli: &Cli) -> CliResult<AnalysisConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let config: AnalysisConfig = serde_json::from_str(&fs::read_to_string(path)?)?;
            log::info!("Loaded config from {}", path.display());
            config
        }
        None => AnalysisConfig::default(),
    };
    if let Some(strategy) = cli.strategy {
        config.tempo_strategy = strategy;
    }
    Ok(config)
}

fn list(library: &Library) -> CliResult<()> {
    let files = library.contents()?;
    let rows: Vec<(&str, &str)> = files
        .iter()
        .map(|f| f.rsplit_once('.').unwrap_or((f.as_str(), "")))
        .collect();
    let width = rows.iter().map(|(stem, _)| stem.len()).max().unwrap_or(0).max(8);

    println!("{:>4}  {:<width$}  {}", "", "Filename", "Extension", width = width);
    for (i, (stem, ext)) in rows.iter().enumerate() {
        println!("{:>4}  {:<width$}  {}", i, stem, ext, width = width);
    }
    Ok(())
}

fn add(library: &Library, source: &Path) -> CliResult<()> {
    library.add(source)?;
    let name = source.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    println!("Successfully added {} to library", name);
    Ok(())
}

fn delete(library: &Library, name: &str) -> CliResult<()> {
    library.delete(name)?;
    println!("Successfully removed {} from library.", name);
    Ok(())
}

fn set(library: &mut Library, dir: &Path) -> CliResult<()> {
    library.set_path(dir)?;
    println!("Successfully placed library at {}", dir.display());
    Ok(())
}

fn tempo(cli: &Cli, library: &Library, config: &AnalysisConfig, name: &str) -> CliResult<()> {
    let path = library.resolve(name)?;
    if !cli.json {
        println!("Estimating tempo...");
    }
    let waveform = load_waveform(&path, &LoadOptions::default())?;

    let analyzer = TempoAnalyzer::new(config);
    let detection = analyzer.detect_onsets(&waveform)?;
    if let Some(dump) = &cli.dump_novelty {
        fs::write(dump, serde_json::to_string(&detection.diagnostics())?)?;
        log::info!("Wrote novelty function to {}", dump.display());
    }
    if let Some(click) = &cli.click_track {
        write_click_track(
            click,
            &detection.onsets,
            waveform.sample_rate(),
            DEFAULT_CLICK_FREQUENCY,
        )?;
    }

    let analysis = analyzer.estimate(detection)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("Tempo: {} BPM.", analysis.bpm.bpm());
    }
    Ok(())
}

fn key(cli: &Cli, library: &Library, config: &AnalysisConfig, name: &str) -> CliResult<()> {
    let path = library.resolve(name)?;
    if !cli.json {
        println!("Estimating key...");
    }
    let waveform = load_waveform(&path, &LoadOptions::default())?;
    let prediction = KeyAnalyzer::new(config).predict_key(&waveform)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
        return Ok(());
    }

    let confidence = prediction.confidence.round();
    let color = if confidence < 33.0 {
        RED
    } else if confidence < 66.0 {
        YELLOW
    } else {
        GREEN
    };
    println!(
        "Key signature: {} ({})",
        prediction.key,
        prediction.key.numerical()
    );
    println!("{}Confidence: {}%{}", color, confidence, END);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "composer",
            "-t",
            "song.wav",
            "--strategy",
            "naive",
            "-l",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.tempo.as_deref(), Some("song.wav"));
        assert_eq!(cli.strategy, Some(TempoStrategy::Naive));
        assert!(cli.list);
        assert!(cli.json);
        assert!(cli.key.is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_strategy() {
        assert!(Cli::try_parse_from(["composer", "--strategy", "median"]).is_err());
    }

    #[test]
    fn test_run_library_operations() {
        let dir = tempfile::tempdir().unwrap();
        let music = dir.path().join("music");
        fs::create_dir(&music).unwrap();
        let library_config = dir.path().join("library.json");
        composer_dsp::library::LibraryConfig {
            library_path: music.clone(),
        }
        .save(&library_config)
        .unwrap();

        let source = dir.path().join("a.wav");
        fs::write(&source, b"RIFF").unwrap();

        let args: Vec<OsString> = vec![
            "composer".into(),
            "--library-config".into(),
            library_config.clone().into(),
            "-a".into(),
            source.into(),
            "-l".into(),
        ];
        assert!(run(Cli::try_parse_from(args).unwrap()));
        assert!(music.join("a.wav").exists());

        // Analysing a file that is not in the library fails without panicking
        let args: Vec<OsString> = vec![
            "composer".into(),
            "--library-config".into(),
            library_config.into(),
            "-t".into(),
            "missing.wav".into(),
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(!run(cli));
    }
}
