use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mrt::prelude::*;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::BufWriter;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod provenance;
mod render;

use provenance::Payload;
use render::SvgRenderer;

const METADATA_FILE: &str = "metadata.jsonl";

#[derive(Parser)]
#[command(name = "mrt-cli")]
#[command(about = "Mental rotation test image generator")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Generate puzzle images and append their metadata to metadata.jsonl
    Generate(GenerateArgs),
    /// Print the shape catalog as JSON
    Shapes,
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Clone, Debug)]
struct GenerateArgs {
    /// easy: 3 options, right-angle rotations; complex: 4 options, composed rotations
    #[arg(long, short = 'd', default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,
    #[arg(
        long = "num-images",
        alias = "num_images",
        short = 'n',
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    num_images: u32,
    /// Fill colour of the polycubes
    #[arg(long, short = 'c', default_value = "white")]
    color: String,
    #[arg(long, short = 's', default_value_t = 69, conflicts_with = "entropy")]
    seed: u64,
    /// Seed from OS entropy instead of --seed (not reproducible)
    #[arg(long)]
    entropy: bool,
    /// Output directory (defaults to data/mrt/<difficulty>)
    #[arg(long, short = 'o')]
    outdir: Option<PathBuf>,
    /// Truncate an existing metadata.jsonl instead of appending
    #[arg(long)]
    fresh: bool,
}

impl GenerateArgs {
    fn outdir(&self) -> PathBuf {
        self.outdir
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("data/mrt/{}", self.difficulty)))
    }

    fn seed(&self) -> Option<u64> {
        (!self.entropy).then_some(self.seed)
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Generate(args) => {
            let outdir = generate(&args)?;
            println!(
                "Generated {} {} MRT images in {}",
                args.num_images,
                args.difficulty,
                outdir.display()
            );
            Ok(())
        }
        Action::Shapes => shapes(),
        Action::Report => report(),
    }
}

fn generate(args: &GenerateArgs) -> Result<PathBuf> {
    let outdir = args.outdir();
    tracing::info!(
        difficulty = %args.difficulty,
        num_images = args.num_images,
        seed = ?args.seed(),
        outdir = %outdir.display(),
        "generate"
    );
    fs::create_dir_all(&outdir)
        .with_context(|| format!("creating output dir {}", outdir.display()))?;

    let metadata_path = outdir.join(METADATA_FILE);
    let mut opts = OpenOptions::new();
    opts.create(true);
    if args.fresh {
        opts.write(true).truncate(true);
    } else {
        opts.append(true);
    }
    let file = opts
        .open(&metadata_path)
        .with_context(|| format!("opening {}", metadata_path.display()))?;
    let mut metadata = JsonlSink::new(BufWriter::new(file));
    let mut render = SvgRenderer::new(&outdir);

    let catalog = Catalog::standard();
    let rng = match args.seed() {
        Some(seed) => RandomSources::from_seed(seed),
        None => RandomSources::from_entropy(),
    };
    let mut generator = Generator::new(&catalog, GeneratorCfg::default(), rng);
    let style = FigureStyle::for_difficulty(args.difficulty, args.color.clone());
    let records = generator
        .run(
            args.difficulty,
            args.num_images as usize,
            &style,
            &mut render,
            &mut metadata,
        )
        .with_context(|| format!("generating puzzles into {}", outdir.display()))?;

    let params = serde_json::json!({
        "difficulty": args.difficulty,
        "num_images": args.num_images,
        "color": args.color,
        "seed": args.seed(),
    });
    let images = records.into_iter().map(|r| r.filename);
    let prov = provenance::write_sidecar(&metadata_path, Payload::new(params).with_outputs(images))?;
    tracing::info!(provenance = %prov.display(), "wrote provenance");
    Ok(outdir)
}

#[derive(Serialize)]
struct ShapeRow<'a> {
    name: &'a str,
    cubes: usize,
    easy: bool,
}

fn shapes() -> Result<()> {
    let catalog = Catalog::standard();
    let rows: Vec<ShapeRow<'_>> = catalog
        .shapes()
        .iter()
        .map(|s| ShapeRow {
            name: &s.name,
            cubes: s.cubes.len(),
            easy: catalog.easy_shapes().contains(&s.name),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "version": mrt::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn parse(argv: &[&str]) -> GenerateArgs {
        let mut full = vec!["mrt-cli", "generate"];
        full.extend_from_slice(argv);
        match Cmd::try_parse_from(full).unwrap().action {
            Action::Generate(args) => args,
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn defaults_follow_difficulty() {
        let args = parse(&[]);
        assert_eq!(args.difficulty, Difficulty::Easy);
        assert_eq!(args.num_images, 1);
        assert_eq!(args.seed(), Some(69));
        assert_eq!(args.outdir(), PathBuf::from("data/mrt/easy"));
        let args = parse(&["-d", "complex", "--entropy"]);
        assert_eq!(args.outdir(), PathBuf::from("data/mrt/complex"));
        assert_eq!(args.seed(), None);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Cmd::try_parse_from(["mrt-cli", "generate", "-n", "0"]).is_err());
        assert!(Cmd::try_parse_from(["mrt-cli", "generate", "-d", "hard"]).is_err());
        assert!(Cmd::try_parse_from(["mrt-cli", "generate", "-s", "1", "--entropy"]).is_err());
    }

    #[test]
    fn seeded_runs_write_identical_metadata() {
        let a = tempdir().unwrap();
        let b = tempdir().unwrap();
        for dir in [&a, &b] {
            let out = dir.path().to_string_lossy().into_owned();
            let args = parse(&["-n", "4", "-d", "complex", "-o", &out, "--fresh"]);
            generate(&args).unwrap();
        }
        let ma = fs::read(a.path().join(METADATA_FILE)).unwrap();
        let mb = fs::read(b.path().join(METADATA_FILE)).unwrap();
        assert_eq!(ma, mb);
        let text = String::from_utf8(ma).unwrap();
        assert_eq!(text.lines().count(), 4);
        for line in text.lines() {
            let rec: PuzzleRecord = serde_json::from_str(line).unwrap();
            assert!(a.path().join(&rec.filename).exists());
        }
        assert!(a.path().join("metadata.provenance.json").exists());
    }

    #[test]
    fn appends_unless_fresh() {
        let dir = tempdir().unwrap();
        let out = dir.path().to_string_lossy().into_owned();
        generate(&parse(&["-n", "2", "-o", &out])).unwrap();
        generate(&parse(&["-n", "3", "-o", &out])).unwrap();
        let lines = |p: &std::path::Path| fs::read_to_string(p).unwrap().lines().count();
        assert_eq!(lines(&dir.path().join(METADATA_FILE)), 5);
        generate(&parse(&["-n", "1", "-o", &out, "--fresh"])).unwrap();
        assert_eq!(lines(&dir.path().join(METADATA_FILE)), 1);
    }
}
