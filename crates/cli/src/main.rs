use anyhow::Result;
use clap::{Parser, Subcommand};
use figclose::gen::{draw_figure, RandomFigureCfg, ReplayToken, MAX_EXTENT};
use figclose::Preprocessor;
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

mod figure;
mod provenance;
mod report;

use figure::Figure;
use provenance::{BuildInfo, Provenance, Source};
use report::ClosureReport;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Close straight-line figures and write segment reports")]
struct Cmd {
    /// Optional run tag; propagated to provenance and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Close a figure JSON file and write the closure report
    Run {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
    },
    /// Draw a reproducible random lattice figure and close it
    Random {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long, default_value_t = RandomFigureCfg::default().points)]
        points: usize,
        #[arg(long, default_value_t = RandomFigureCfg::default().segments)]
        segments: usize,
        #[arg(
            long,
            default_value_t = RandomFigureCfg::default().extent,
            value_parser = clap::value_parser!(i32).range(1..=MAX_EXTENT as i64)
        )]
        extent: i32,
        #[arg(long)]
        out: String,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run { input, out } => run(&input, &out, cmd.tag),
        Action::Random {
            seed,
            index,
            points,
            segments,
            extent,
            out,
        } => {
            let cfg = RandomFigureCfg {
                points,
                segments,
                extent,
            };
            random(cfg, ReplayToken::new(seed, index), &out, cmd.tag)
        }
        Action::Report => report(cmd.tag),
    }
}

fn run(input: &str, out: &str, tag: Option<String>) -> Result<()> {
    tracing::info!(input, out, tag = ?tag, "run");
    let figure = Figure::load(input)?;
    let (db, pp) = figure.close()?;
    let report = ClosureReport::new(&db, &pp);
    report.write(out)?;
    tracing::info!(
        implicit = report.counts.implicit_points,
        minimal = report.counts.minimal,
        non_minimal = report.counts.non_minimal,
        "closed"
    );
    let source = Source::File {
        path: input.to_string(),
        points: figure.points.len(),
        segments: figure.segments.len(),
    };
    Provenance::new(source, &report.counts, Path::new(out))
        .tagged(tag)
        .write()?;
    Ok(())
}

fn random(cfg: RandomFigureCfg, tok: ReplayToken, out: &str, tag: Option<String>) -> Result<()> {
    tracing::info!(seed = tok.seed, index = tok.index, ?cfg, out, tag = ?tag, "random");
    let (mut db, given) = draw_figure(cfg, tok);
    let source = Source::Random {
        seed: tok.seed,
        index: tok.index,
        points: db.len(),
        segments: given.len(),
        extent: cfg.extent,
    };
    let pp = Preprocessor::new(&mut db, given);
    let report = ClosureReport::new(&db, &pp);
    report.write(out)?;
    tracing::info!(
        given = report.counts.given,
        total = report.counts.total,
        "closed"
    );
    Provenance::new(source, &report.counts, Path::new(out))
        .tagged(tag)
        .write()?;
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = serde_json::json!({
        "build": BuildInfo::current(),
        "tags": tag.into_iter().collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
