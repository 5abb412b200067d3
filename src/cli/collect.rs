//! `canonry collect`: run every enabled source and print the result.

use std::fs;
use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use serde_json::json;

use crate::cli::common::Workspace;
use crate::cli::{CollectArgs, OutputFormat};
use crate::collector::{CollectorOptions, LanguageRun, dedup};
use crate::core::UrlEntry;
use crate::generator::{minify_xml, sitemap};
use crate::language::LanguageContext;
use crate::log;

pub fn run_collect(ws: &Workspace, args: &CollectArgs) -> Result<()> {
    let options = if args.sequential {
        CollectorOptions::sequential()
    } else {
        ws.config.collector_options()
    };
    let collector = ws.collector(options);

    let runs = if args.all_languages {
        collector.collect_languages()
    } else {
        let language = LanguageContext::resolve(ws.settings.as_ref(), args.lang.as_deref());
        let entries = collector.collect(&language);
        vec![LanguageRun { language, entries }]
    };

    let total: usize = runs.iter().map(|r| r.entries.len()).sum();
    log!("collect"; "{} urls in {} language run(s)", total, runs.len());

    let formatted = format_runs(&runs, args)?;
    if let Some(ref output_path) = args.output {
        let mut file = fs::File::create(output_path)?;
        file.write_all(formatted.as_bytes())?;
        log!("collect"; "wrote output to {}", output_path.display());
    } else {
        print!("{formatted}");
    }
    Ok(())
}

/// Render runs in the requested format.
fn format_runs(runs: &[LanguageRun], args: &CollectArgs) -> Result<String> {
    let out = match args.format {
        OutputFormat::Text => {
            let entries = dedup(runs.iter().map(|r| r.entries.clone()));
            entries.iter().map(text_line).collect::<String>()
        }
        OutputFormat::Json if args.all_languages => {
            let value: Vec<_> = runs
                .iter()
                .map(|r| {
                    json!({
                        "language": r.language.requested_language,
                        "entries": r.entries,
                    })
                })
                .collect();
            to_json(&value, args.pretty)?
        }
        OutputFormat::Json => {
            let entries = runs.first().map(|r| r.entries.as_slice()).unwrap_or_default();
            to_json(entries, args.pretty)?
        }
        OutputFormat::Xml => {
            let xml = if args.all_languages {
                sitemap::render_languages(runs)
            } else {
                let entries = runs.first().map(|r| r.entries.as_slice()).unwrap_or_default();
                sitemap::render(entries, None)
            };
            String::from_utf8_lossy(&minify_xml(xml.as_bytes(), args.minify)).into_owned()
        }
    };
    Ok(out)
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let mut s = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    s.push('\n');
    Ok(s)
}

fn text_line(entry: &UrlEntry) -> String {
    let lastmod = entry
        .lastmod
        .map_or_else(|| "-".to_string(), |d| d.to_date_string());
    format!(
        "{}\t{}\t{}\t{}\t{}\n",
        entry.loc, entry.priority, entry.changefreq, lastmod, entry.source
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::cli::Commands;
    use crate::core::{SourceId, UrlPath};
    use clap::Parser;

    fn args(extra: &[&str]) -> CollectArgs {
        let argv = ["canonry", "collect"].into_iter().chain(extra.iter().copied());
        match Cli::parse_from(argv).command {
            Commands::Collect { args } => args,
            Commands::Routes { .. } => unreachable!(),
        }
    }

    fn runs() -> Vec<LanguageRun> {
        let entry = UrlEntry::new(
            "https://x.org/posts/1".to_string(),
            UrlPath::new("/posts/1"),
            SourceId::Posts,
        );
        vec![LanguageRun {
            language: LanguageContext::single(),
            entries: vec![entry],
        }]
    }

    #[test]
    fn test_text_format() {
        let out = format_runs(&runs(), &args(&[])).unwrap();
        assert_eq!(out, "https://x.org/posts/1\t0.5\tweekly\t-\tposts\n");
    }

    #[test]
    fn test_json_format() {
        let out = format_runs(&runs(), &args(&["-f", "json"])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["loc"], "https://x.org/posts/1");
    }

    #[test]
    fn test_xml_format_minified() {
        let out = format_runs(&runs(), &args(&["-f", "xml", "--minify"])).unwrap();
        assert!(!out.contains('\n'));
        assert!(out.contains("<loc>https://x.org/posts/1</loc>"));
    }
}
