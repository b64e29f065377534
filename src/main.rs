mod cli;

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::Parser;
use cli::{Args, CatalogKind, Commands};
use lib_asset::{
    Catalog, CatalogEntry, CatalogSources, Catalogs, EffectCatalog, MaterialCatalog, PropCatalog,
    TileCatalog,
};
use lib_level::{LevelData, LoadOptions};
use lib_notation::ParseMode;
use log::info;

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();

    let mode = args.parse_mode();
    let result = match &args.command {
        Commands::Check { level } => check(&args, level),
        Commands::Resave { level, out } => resave(&args, level, out),
        Commands::Dump { level, section } => dump(level, *section, mode),
        Commands::Catalog { kind, file } => catalog(*kind, file, mode),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {path:?}"))
}

fn read_optional(path: Option<&Path>) -> anyhow::Result<Option<String>> {
    path.map(read).transpose()
}

fn load_catalogs(args: &Args) -> anyhow::Result<Catalogs> {
    let tiles = read_optional(args.tiles.as_deref())?;
    let props = read_optional(args.props.as_deref())?;
    let effects = read_optional(args.effects.as_deref())?;
    let materials = read_optional(args.materials.as_deref())?;

    let catalogs = Catalogs::load(
        CatalogSources {
            tiles: tiles.as_deref(),
            props: props.as_deref(),
            effects: effects.as_deref(),
            materials: materials.as_deref(),
        },
        args.parse_mode(),
    );
    if catalogs.error_count() > 0 {
        info!("{} init file lines were skipped", catalogs.error_count());
    }
    Ok(catalogs)
}

fn load_level(args: &Args, path: &Path) -> anyhow::Result<LevelData> {
    let catalogs = load_catalogs(args)?;
    let options = LoadOptions {
        parse_mode: args.parse_mode(),
    };
    LevelData::load_with(&read(path)?, &catalogs, options)
        .with_context(|| format!("loading {path:?}"))
}

fn check(args: &Args, path: &Path) -> anyhow::Result<()> {
    println!("Checking {path:?}");

    let level = load_level(args, path)?;
    println!("size: {}x{}", level.width(), level.height());
    println!("tiles: {}", level.tile_count());
    println!("props: {}", level.props().len());
    println!("effects: {}", level.effects().len());
    println!("cameras: {}", level.cameras().len());

    let placeholders = level.tiles().filter(|(_, tile)| tile.ty.placeholder).count()
        + level.props().iter().filter(|prop| prop.ty.placeholder).count()
        + level.effects().iter().filter(|fx| fx.ty.placeholder).count();
    if placeholders > 0 {
        println!("unknown names: {placeholders}");
    }
    Ok(())
}

fn resave(args: &Args, path: &Path, out: &Path) -> anyhow::Result<()> {
    println!("Resaving {path:?} into {out:?}");

    let level = load_level(args, path)?;
    fs::write(out, level.save()).with_context(|| format!("writing {out:?}"))
}

fn dump(path: &Path, section: Option<usize>, mode: ParseMode) -> anyhow::Result<()> {
    let sections = LevelData::section_values(&read(path)?, mode);
    if let Some(idx) = section {
        if idx >= sections.len() {
            bail!("{path:?} has {} sections", sections.len());
        }
    }

    for (idx, value) in sections.into_iter().enumerate() {
        if section.is_some_and(|wanted| wanted != idx) {
            continue;
        }
        let value = value.with_context(|| format!("dumping {path:?}"))?;
        println!("// section {idx}");
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}

fn catalog(kind: CatalogKind, path: &Path, mode: ParseMode) -> anyhow::Result<()> {
    let src = read(path)?;
    match kind {
        CatalogKind::Tiles => report(&TileCatalog::load(&src, mode)),
        CatalogKind::Props => report(&PropCatalog::load(&src, mode)),
        CatalogKind::Effects => report(&EffectCatalog::load(&src, mode)),
        CatalogKind::Materials => report(&MaterialCatalog::load(&src, mode)),
    }
    Ok(())
}

fn report<T: CatalogEntry>(catalog: &Catalog<T>) {
    for category in catalog.categories() {
        println!("{}: {} entries", category.name, category.entries.len());
    }
    for error in catalog.errors() {
        println!("{error}");
    }
    println!("{} entries, {} errors", catalog.len(), catalog.errors().len());
}
