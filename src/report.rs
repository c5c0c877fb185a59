use remangle::{DeleteStats, Hit, RunStats};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub use ansi::Palette;

/// One line per matching guess, as they happen.
pub fn print_hit(hit: &Hit, revert: bool, palette: &Palette) {
    let verb = if revert { "recovered" } else { "cracked" };
    println!(
        "{} {} {}  {} {}",
        palette.paint(verb, ansi::GREEN),
        palette.bold(&hit.guess),
        palette.dim(format!("from {:?}", hit.word)),
        palette.paint(format!("rule {:?}", hit.rule), ansi::CYAN),
        palette.dim(format!("guess #{}", hit.guess_number)),
    );
}

/// Periodic progress line in the classic bench format.
pub fn print_progress(stats: &RunStats, palette: &Palette) {
    println!(
        "{}",
        palette.dim(format!(
            "PW: {:7}; G: {:10}; avg: {:10.2}g/s; acc: {:10.4}s",
            stats.words,
            stats.guesses,
            stats.guesses_per_sec(),
            stats.elapsed.as_secs_f64(),
        ))
    );
}

pub fn print_summary(stats: &RunStats, have_targets: bool, palette: &Palette) {
    println!("\n{}", palette.paint("━━━ Run ━━━", ansi::GRAY));
    println!(
        "  Words: {}  │  Guesses: {}  │  Elapsed: {:.3}s",
        palette.bold(stats.words.to_string()),
        palette.bold(stats.guesses.to_string()),
        stats.elapsed.as_secs_f64(),
    );
    println!(
        "  Throughput: {}",
        palette.paint(format!("{:.0} guesses/s", stats.guesses_per_sec()), ansi::GREEN),
    );
    if have_targets {
        let hits = format!("Hits: {}", stats.hits);
        if stats.hits > 0 {
            println!("  {}", palette.paint(hits, ansi::YELLOW));
        } else {
            println!("  {}", palette.dim(hits));
        }
    } else {
        println!("  {}", palette.dim("No target list; guesses were counted, not checked"));
    }
}

/// Summary for a delete-tracing run, kept off stdout so the record stream
/// can be piped.
pub fn print_delete_summary(stats: &DeleteStats, saved_to: Option<&str>, palette: &Palette) {
    let target = match saved_to {
        Some(path) => format!(" -> {path}"),
        None => String::new(),
    };
    eprintln!(
        "{}",
        palette.dim(format!(
            "entries: {}; delete records: {}{}",
            stats.entries, stats.records, target
        ))
    );
}
