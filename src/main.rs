mod report;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, IsTerminal, Write};

use anyhow::{Context, Result, bail};
use remangle::{
    ForwardEngine, ReversionEngine, RuleSet, TargetSet, read_rules, read_targets, read_words,
    run_forward, run_revert, trace_deletes, words_from,
};

const DEFAULT_PROGRESS_EVERY: u64 = 2048;

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&config) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

struct CliConfig {
    rules_file: Option<String>,
    inline_rules: Vec<String>,
    words: Option<String>,
    targets: Option<String>,
    revert: bool,
    indices: Option<Vec<usize>>,
    log: Option<String>,
    deletes: Option<String>,
    save: Option<String>,
    progress_every: u64,
    color: bool,
}

fn run(config: &CliConfig) -> Result<()> {
    let palette = report::Palette::new(config.color);

    if let Some(log_path) = &config.deletes {
        return run_deletes(config, log_path, &palette);
    }

    let sources = match &config.rules_file {
        Some(path) => read_rules(path)?,
        None => config.inline_rules.clone(),
    };
    if sources.is_empty() {
        bail!("no rules to apply (the rule file held only comments and blanks)");
    }
    let rules = RuleSet::compile(&sources);

    let targets = match &config.targets {
        Some(path) => read_targets(path)?,
        None => TargetSet::default(),
    };

    let words: Box<dyn Iterator<Item = io::Result<(usize, String)>>> = match &config.words {
        Some(path) => Box::new(read_words(path)?),
        None => Box::new(words_from(io::stdin().lock())),
    };

    let stats = if config.revert {
        let mut engine = ReversionEngine::new(rules);
        if let Some(indices) = &config.indices {
            engine.change_active_indices(indices.iter().copied());
        }
        run_revert(
            &engine,
            words,
            &targets,
            config.progress_every,
            |hit| report::print_hit(hit, true, &palette),
            |stats| report::print_progress(stats, &palette),
        )?
    } else {
        let logging = config.log.is_some();
        let mut log_entries: Vec<(usize, String, Vec<usize>)> = Vec::new();
        let mut engine = ForwardEngine::new(rules);
        let stats = run_forward(
            &mut engine,
            words,
            &targets,
            config.progress_every,
            |hit| {
                report::print_hit(hit, false, &palette);
                if logging {
                    match log_entries.last_mut() {
                        Some((index, _, ids)) if *index == hit.word_index => {
                            ids.push(hit.rule_index);
                        }
                        _ => log_entries.push((
                            hit.word_index,
                            hit.word.clone(),
                            vec![hit.rule_index],
                        )),
                    }
                }
            },
            |stats| report::print_progress(stats, &palette),
        )?;
        if let Some(path) = &config.log {
            write_hit_log(path, &sources, &log_entries)?;
        }
        stats
    };

    report::print_summary(&stats, !targets.is_empty(), &palette);
    Ok(())
}

fn run_deletes(config: &CliConfig, log_path: &str, palette: &report::Palette) -> Result<()> {
    let log = BufReader::new(
        File::open(log_path).with_context(|| format!("failed to open guess log {log_path}"))?,
    );

    let stats = match &config.save {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create delete report {path}"))?;
            let mut out = BufWriter::new(file);
            let stats = trace_deletes(log, &mut out)?;
            out.flush().with_context(|| format!("failed to write delete report {path}"))?;
            stats
        }
        None => {
            let mut out = io::stdout().lock();
            trace_deletes(log, &mut out)?
        }
    };

    report::print_delete_summary(&stats, config.save.as_deref(), palette);
    Ok(())
}

/// Guess log format consumed by `--deletes`: one JSON meta line naming the
/// rules, then one `[word, [rule_ids...]]` line per word that hit.
fn write_hit_log(
    path: &str,
    sources: &[String],
    entries: &[(usize, String, Vec<usize>)],
) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create guess log {path}"))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "{}", serde_json::json!({ "rules": sources }))
        .with_context(|| format!("failed to write guess log {path}"))?;
    for (_, word, ids) in entries {
        writeln!(out, "{}", serde_json::json!([word, ids]))
            .with_context(|| format!("failed to write guess log {path}"))?;
    }
    out.flush().with_context(|| format!("failed to write guess log {path}"))
}

fn parse_args() -> Result<CliConfig, String> {
    let mut config = CliConfig {
        rules_file: None,
        inline_rules: Vec::new(),
        words: None,
        targets: None,
        revert: false,
        indices: None,
        log: None,
        deletes: None,
        save: None,
        progress_every: DEFAULT_PROGRESS_EVERY,
        color: io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    };
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("remangle {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => config.color = true,
            "--no-color" => config.color = false,
            "--revert" => config.revert = true,
            "-r" | "--rules" => config.rules_file = Some(expect_value(&arg, &mut args)?),
            "-w" | "--words" => config.words = Some(expect_value(&arg, &mut args)?),
            "-t" | "--targets" => config.targets = Some(expect_value(&arg, &mut args)?),
            "--indices" => {
                config.indices = Some(parse_indices(&expect_value(&arg, &mut args)?)?);
            }
            "--log" => config.log = Some(expect_value(&arg, &mut args)?),
            "--deletes" => config.deletes = Some(expect_value(&arg, &mut args)?),
            "-s" | "--save" => config.save = Some(expect_value(&arg, &mut args)?),
            "--progress" => {
                config.progress_every = parse_progress(&expect_value(&arg, &mut args)?)?;
            }
            "--" => {
                config.inline_rules.extend(args);
                break;
            }
            _ if arg.starts_with("--rules=") => {
                config.rules_file = Some(value_of(&arg));
            }
            _ if arg.starts_with("--words=") => {
                config.words = Some(value_of(&arg));
            }
            _ if arg.starts_with("--targets=") => {
                config.targets = Some(value_of(&arg));
            }
            _ if arg.starts_with("--indices=") => {
                config.indices = Some(parse_indices(&value_of(&arg))?);
            }
            _ if arg.starts_with("--log=") => {
                config.log = Some(value_of(&arg));
            }
            _ if arg.starts_with("--deletes=") => {
                config.deletes = Some(value_of(&arg));
            }
            _ if arg.starts_with("--save=") => {
                config.save = Some(value_of(&arg));
            }
            _ if arg.starts_with("--progress=") => {
                config.progress_every = parse_progress(&value_of(&arg))?;
            }
            _ if arg.starts_with('-') && arg.len() > 1 => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => config.inline_rules.push(arg),
        }
    }

    if config.deletes.is_some() {
        if config.rules_file.is_some()
            || !config.inline_rules.is_empty()
            || config.words.is_some()
            || config.targets.is_some()
            || config.revert
            || config.indices.is_some()
            || config.log.is_some()
        {
            return Err("error: --deletes runs on its own (rules come from the log)".to_string());
        }
        return Ok(config);
    }

    if config.save.is_some() {
        return Err("error: --save only applies to --deletes".to_string());
    }
    if config.rules_file.is_some() && !config.inline_rules.is_empty() {
        return Err("error: pass rules inline or via --rules, not both".to_string());
    }
    if config.rules_file.is_none() && config.inline_rules.is_empty() {
        return Err(format!("error: no rules provided\n\n{}", help_text()));
    }
    if config.indices.is_some() && !config.revert {
        return Err("error: --indices only applies to --revert".to_string());
    }
    if config.log.is_some() && config.revert {
        return Err("error: --log only applies to forward runs".to_string());
    }

    Ok(config)
}

fn expect_value(flag: &str, args: &mut impl Iterator<Item = String>) -> Result<String, String> {
    args.next().ok_or_else(|| format!("error: {flag} expects a value"))
}

fn value_of(arg: &str) -> String {
    match arg.split_once('=') {
        Some((_, value)) => value.to_string(),
        None => String::new(),
    }
}

fn parse_indices(value: &str) -> Result<Vec<usize>, String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>()
                .map_err(|_| format!("error: invalid rule index '{part}' in --indices"))
        })
        .collect()
}

fn parse_progress(value: &str) -> Result<u64, String> {
    value
        .parse::<u64>()
        .map_err(|_| format!("error: invalid --progress '{value}' (expected a word count, 0 disables)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "remangle {version}

Hashcat-style rule engine CLI: mangle a word list forward, or run rules
backwards over already-mangled guesses.

Usage:
  remangle [OPTIONS] --rules <file>
  remangle [OPTIONS] [--] <rule>...
  remangle --deletes <log> [--save <file>]

Options:
  -r, --rules <file>      Rule file, one rule per line ('#' comments and
                          blank lines are skipped). Rules can be given
                          inline instead, as positional arguments.
  -w, --words <file>      Word list; reads stdin when omitted.
  -t, --targets <file>    Target list; matching guesses are printed as hits.
  --revert                Run the reversion engine: treat input words as
                          mangled guesses and recover candidate sources.
  --indices <list>        Comma-separated rule indices to replay.
                          Only with --revert.
  --log <file>            Record hits as a JSON guess log (forward only).
  --deletes <log>         Replay a recorded guess log and write one
                          D<TAB>pos<TAB>char line per delete that fired.
  -s, --save <file>       Write delete records to a file instead of stdout.
  --progress <n>          Progress line every n words (0 disables).
                          Default: {progress}.
  --color                 Force ANSI color output.
  --no-color              Disable ANSI color output.
  -h, --help              Show this help message.
  -V, --version           Print version information.

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        progress = DEFAULT_PROGRESS_EVERY
    )
}
