//! Classify command - score a document against a set of models

use anyhow::{Context, Result};
use console::style;
use langdet::classify::{best_match, score_all_reader};
use langdet::{Model, ModelSet};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Run the classify command
pub fn run(model_args: &[String], test: Option<&Path>, format: &str, all: bool) -> Result<()> {
    let models = load_models(model_args)?;

    let ranking = match test {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            score_all_reader(BufReader::new(file), &models)
        }
        None => score_all_reader(std::io::stdin().lock(), &models),
    }
    .context("Classification failed")?;

    let best = best_match(&ranking);

    if format == "json" {
        let value = if all {
            serde_json::json!({ "best": best, "scores": ranking })
        } else {
            serde_json::to_value(&best)?
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if all {
        for score in &ranking {
            println!("{}\t{:.6}", score.language, score.similarity);
        }
        return Ok(());
    }

    match &best.language {
        Some(language) => println!("{}\t{:.6}", style(language).cyan(), best.similarity),
        None => println!("{}\t{:.6}", style("no match").yellow(), best.similarity),
    }
    Ok(())
}

/// Load every model argument into a set, rejecting duplicate languages
fn load_models(args: &[String]) -> Result<ModelSet> {
    let mut models = ModelSet::new();
    for arg in args {
        let (language, path) = parse_model_arg(arg)?;
        if models.contains(&language) {
            anyhow::bail!(
                "Language '{}' given twice (second time from {})",
                language,
                path.display()
            );
        }
        let model = Model::load(&path)
            .with_context(|| format!("Failed to load model {}", path.display()))?;
        tracing::debug!("Loaded model '{}' from {}", language, path.display());
        models.insert(language, model);
    }
    Ok(models)
}

/// `CODE=PATH`, or a bare path whose file name starts with the language code
fn parse_model_arg(arg: &str) -> Result<(String, PathBuf)> {
    if let Some((language, path)) = arg.split_once('=') {
        if language.is_empty() || path.is_empty() {
            anyhow::bail!("Invalid model argument '{}', expected CODE=PATH", arg);
        }
        return Ok((language.to_string(), PathBuf::from(path)));
    }

    let path = PathBuf::from(arg);
    let language = language_from_path(&path).with_context(|| {
        format!(
            "Cannot derive a language code from '{}', use CODE=PATH",
            arg
        )
    })?;
    Ok((language, path))
}

/// File name prefix up to the first '.', '-' or '_'
fn language_from_path(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let code = name.split(['.', '-', '_']).next()?;
    (!code.is_empty()).then(|| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_path() {
        assert_eq!(
            language_from_path(Path::new("models/en.txt-model.json")).as_deref(),
            Some("en")
        );
        assert_eq!(
            language_from_path(Path::new("pt_BR-model.json")).as_deref(),
            Some("pt")
        );
        assert_eq!(language_from_path(Path::new("deu")).as_deref(), Some("deu"));
        assert_eq!(language_from_path(Path::new(".hidden")), None);
    }

    #[test]
    fn test_parse_explicit_code() {
        let (language, path) = parse_model_arg("zh=models/chinese.json").unwrap();
        assert_eq!(language, "zh");
        assert_eq!(path, PathBuf::from("models/chinese.json"));
    }

    #[test]
    fn test_parse_rejects_empty_code() {
        assert!(parse_model_arg("=model.json").is_err());
        assert!(parse_model_arg("en=").is_err());
    }

    #[test]
    fn test_duplicate_language_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("en-model.json");
        Model::default().save(&path).unwrap();
        let arg = path.display().to_string();
        let err = load_models(&[arg.clone(), arg]).unwrap_err();
        assert!(err.to_string().contains("given twice"));
    }
}
