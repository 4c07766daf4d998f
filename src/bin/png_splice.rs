use std::io::Write;

use anyhow::{bail, Context};
use png_splice::{
    append_trailer, extract_trailer_text, iter_chunks, patch_dimensions_confirmed,
    query_dimensions, DimensionSpec,
};

fn main() -> anyhow::Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.first().map(|a| a == "-v").unwrap_or(false);
    if verbose {
        args.remove(0);
    }
    let verbosity = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Error
    };
    pretty_env_logger::formatted_builder()
        .filter_level(verbosity)
        .init();

    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };
    match command.as_str() {
        "insert" => insert(&args[1..]),
        "extract" => extract(&args[1..]),
        "resize" => resize(&args[1..]),
        "info" => info(&args[1..]),
        other => {
            print_usage();
            bail!("unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("png-splice [-v] <command>");
    println!("  insert <input> <output> <text...>   append text after the terminal chunk");
    println!("  extract <input>                     read appended text back out");
    println!("  resize <input> <output> [--width N] [--height N] [--scale F] [--lock] [--yes]");
    println!("                                      rewrite header dimensions (metadata only)");
    println!("  info <input>                        dimensions and chunk layout as JSON");
}

fn insert(args: &[String]) -> anyhow::Result<()> {
    if args.len() < 3 {
        bail!("usage: png-splice insert <input> <output> <text...>");
    }
    let (input, output) = (&args[0], &args[1]);
    let text = args[2..].join(" ");
    let source = read(input)?;
    let stashed = append_trailer(&source, text.as_bytes())?;
    std::fs::write(output, &stashed).with_context(|| format!("failed to write {output}"))?;
    println!("inserted {} bytes into {output}", text.len());
    Ok(())
}

fn extract(args: &[String]) -> anyhow::Result<()> {
    if args.len() != 1 {
        bail!("usage: png-splice extract <input>");
    }
    let source = read(&args[0])?;
    match extract_trailer_text(&source)? {
        Some(text) => println!("{text}"),
        None => println!("no data after the terminal chunk"),
    }
    Ok(())
}

fn resize(args: &[String]) -> anyhow::Result<()> {
    if args.len() < 2 {
        bail!("usage: png-splice resize <input> <output> [--width N] [--height N] [--scale F] [--lock] [--yes]");
    }
    let (input, output) = (&args[0], &args[1]);
    let mut spec = DimensionSpec::default();
    let mut assume_yes = false;
    let mut rest = args[2..].iter();
    while let Some(flag) = rest.next() {
        match flag.as_str() {
            "--width" => spec.width = Some(flag_value(rest.next(), "--width")?),
            "--height" => spec.height = Some(flag_value(rest.next(), "--height")?),
            "--scale" => spec.scale = Some(flag_value(rest.next(), "--scale")?),
            "--lock" => spec.keep_aspect = true,
            "--yes" => assume_yes = true,
            other => bail!("unknown flag: {other}"),
        }
    }

    let source = read(input)?;
    let patched = patch_dimensions_confirmed(&source, &spec, |current, target| {
        assume_yes || confirm_stretch(current, target)
    })?;
    match patched {
        Some(buf) => {
            std::fs::write(output, &buf).with_context(|| format!("failed to write {output}"))?;
            println!("wrote {output}");
        }
        None => println!("cancelled, {output} not written"),
    }
    Ok(())
}

fn confirm_stretch(current: (u32, u32), target: (u32, u32)) -> bool {
    println!(
        "this rewrites the header only; pixel data stays {}x{} and will display stretched to {}x{}",
        current.0, current.1, target.0, target.1
    );
    print!("continue? [y/N] ");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim(), "y" | "Y" | "yes")
}

fn info(args: &[String]) -> anyhow::Result<()> {
    if args.len() != 1 {
        bail!("usage: png-splice info <input>");
    }
    let input = &args[0];
    let source = read(input)?;
    let (width, height) = query_dimensions(&source)?;
    let chunks: Vec<_> = iter_chunks(&source)?
        .map(|chunk| {
            serde_json::json!({
                "type": String::from_utf8_lossy(&chunk.type_tag),
                "offset": chunk.start(),
                "data_length": chunk.data_length,
            })
        })
        .collect();
    let report = serde_json::json!({
        "file": input,
        "width": width,
        "height": height,
        "chunks": chunks,
    });
    println!("{report}");
    Ok(())
}

fn read(path: &str) -> anyhow::Result<Vec<u8>> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {path}"))?;
    log::info!("read {} bytes from {path}", bytes.len());
    Ok(bytes)
}

fn flag_value<T: std::str::FromStr>(value: Option<&String>, flag: &str) -> anyhow::Result<T> {
    value
        .with_context(|| format!("{flag} needs a value"))?
        .parse()
        .map_err(|_| anyhow::anyhow!("{flag} needs a numeric value"))
}
