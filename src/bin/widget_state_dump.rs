//! Prints the `comm_open` message (or embed manifest) a widget would send.
//!
//! Used to check the advertised state against the front-end model defaults.

use chart_widgets::api::{ChartVariant, ChartWidget, WidgetOptions};
use chart_widgets::protocol::EmbedManifest;
use chart_widgets::sink::RecordingSink;

struct CliArgs {
    variants: Vec<ChartVariant>,
    comm_id: Option<String>,
    embed: bool,
}

fn main() {
    let _ = chart_widgets::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let mut manifest = EmbedManifest::new();

    for variant in args.variants {
        let mut options = WidgetOptions::default();
        if let Some(comm_id) = &args.comm_id {
            options = options.with_comm_id(format!("{comm_id}-{}", variant.tag()));
        }
        let widget = ChartWidget::with_options(variant, options, RecordingSink::default());

        if args.embed {
            manifest.insert(widget.comm_id().to_owned(), widget.embed_state());
            continue;
        }
        let opened = widget
            .sink()
            .messages()
            .first()
            .ok_or_else(|| format!("no comm_open recorded for `{variant}`"))?;
        let json = serde_json::to_string_pretty(opened)
            .map_err(|err| format!("failed to serialize comm_open for `{variant}`: {err}"))?;
        println!("{json}");
    }

    if args.embed {
        let json = manifest
            .to_json_pretty()
            .map_err(|err| format!("failed to serialize embed manifest: {err}"))?;
        println!("{json}");
    }
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut variants = Vec::new();
    let mut comm_id = None;
    let mut embed = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--all" => variants.extend(ChartVariant::ALL),
            "--embed" => embed = true,
            "--comm-id" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --comm-id".to_owned())?;
                comm_id = Some(value);
            }
            "--help" | "-h" => {
                println!("usage: widget_state_dump [--all] [--embed] [--comm-id <prefix>] [chart-type ...]");
                std::process::exit(0);
            }
            tag => {
                let variant = tag
                    .parse::<ChartVariant>()
                    .map_err(|err| err.to_string())?;
                variants.push(variant);
            }
        }
    }

    if variants.is_empty() {
        return Err("no chart type given; pass a tag such as `bar-chart` or --all".to_owned());
    }
    Ok(CliArgs {
        variants,
        comm_id,
        embed,
    })
}
