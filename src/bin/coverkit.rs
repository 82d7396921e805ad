use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;
use tracing_subscriber::EnvFilter;

use coverkit::{
    ControlRange, CoverConfig, CpuRenderer, DownloadSink, EditorAction, EditorRuntime, FieldKey,
    FontSet, ImageControl, Notice, NoticeLevel, NoticeSource, SelectedFile, SurfaceRenderer,
    TemplateKind,
};

#[derive(Parser, Debug)]
#[command(name = "coverkit", version, about = "Compose and export book covers")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export the full-resolution cover PNG (3200x5120).
    Render(RenderArgs),
    /// Write the on-screen preview PNG (600x960).
    Preview(PreviewArgs),
    /// Print a template's text fields and defaults as JSON.
    Fields(FieldsArgs),
    /// Print the family name and SHA-256 of a font file.
    Fonts(FontsArgs),
}

#[derive(Parser, Debug)]
struct CoverArgs {
    /// Template to edit.
    #[arg(long, value_parser = parse_template, conflicts_with = "route")]
    template: Option<TemplateKind>,

    /// Route of the template to edit (`/` or `/teas`).
    #[arg(long)]
    route: Option<String>,

    /// Background image (PNG or JPEG).
    #[arg(long)]
    background: Option<PathBuf>,

    /// Set a text field, e.g. `--set title=NCLEX`. Repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    sets: Vec<String>,

    /// Background opacity in [0, 1].
    #[arg(long)]
    opacity: Option<f64>,

    /// Horizontal background offset in logical pixels.
    #[arg(long, allow_hyphen_values = true)]
    x: Option<f64>,

    /// Vertical background offset in logical pixels.
    #[arg(long, allow_hyphen_values = true)]
    y: Option<f64>,

    /// Background scale in [0.1, 2].
    #[arg(long)]
    scale: Option<f64>,

    /// Font used for all text. Overrides the config file.
    #[arg(long)]
    font: Option<PathBuf>,

    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    cover: CoverArgs,

    /// Directory the cover is saved into. Overrides the config file.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    cover: CoverArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FieldsArgs {
    /// Template to describe.
    #[arg(long, value_parser = parse_template, default_value = "study")]
    template: TemplateKind,
}

#[derive(Parser, Debug)]
struct FontsArgs {
    /// Font file (TTF/OTF/TTC).
    #[arg(long)]
    font: PathBuf,
}

fn parse_template(s: &str) -> Result<TemplateKind, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Fields(args) => cmd_fields(args),
        Command::Fonts(args) => cmd_fonts(args),
    }
}

fn init_tracing(config: &CoverConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.log_filter.as_deref().unwrap_or("warn"))
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<CoverConfig> {
    match path {
        Some(p) => CoverConfig::load(p).with_context(|| format!("load config '{}'", p.display())),
        None => Ok(CoverConfig::default()),
    }
}

fn template_of(args: &CoverArgs) -> anyhow::Result<TemplateKind> {
    match (&args.template, &args.route) {
        (Some(kind), _) => Ok(*kind),
        (None, Some(route)) => Ok(TemplateKind::from_route(route)?),
        (None, None) => Ok(TemplateKind::Study),
    }
}

fn renderer_for(args: &CoverArgs, config: &CoverConfig) -> anyhow::Result<CpuRenderer> {
    let font = match &args.font {
        Some(p) => Some(FontSet::from_path(p).with_context(|| format!("load font '{}'", p.display()))?),
        None => config.font_set().context("load configured font")?,
    };
    if font.is_none() {
        eprintln!("warning: no font configured; text will not be drawn (use --font)");
    }
    Ok(CpuRenderer::new(font))
}

fn print_notices<R, S>(rt: &EditorRuntime<R, S>)
where
    R: SurfaceRenderer,
    S: DownloadSink,
{
    for Notice {
        source,
        level,
        message,
    } in rt.editor().notices().iter()
    {
        let level = match level {
            NoticeLevel::Error => "error",
            NoticeLevel::Info => "info",
        };
        eprintln!("{level} ({source:?}): {message}");
    }
}

fn fail_on_notice<R, S>(rt: &EditorRuntime<R, S>, source: NoticeSource) -> anyhow::Result<()>
where
    R: SurfaceRenderer,
    S: DownloadSink,
{
    match rt.editor().notices().get(source) {
        Some(n) if n.level == NoticeLevel::Error => anyhow::bail!("{}", n.message),
        _ => Ok(()),
    }
}

/// Drive the editor the way a user would: edit text, upload and confirm a background, then set
/// the sliders.
fn apply_edits<R, S>(rt: &mut EditorRuntime<R, S>, args: &CoverArgs) -> anyhow::Result<()>
where
    R: SurfaceRenderer,
    S: DownloadSink,
{
    let kind = rt.editor().kind();
    for set in &args.sets {
        let (key, value) = set
            .split_once('=')
            .with_context(|| format!("--set '{set}' is not KEY=VALUE"))?;
        let key: FieldKey = key.parse()?;
        if rt.editor().fields().get(key).is_none() {
            anyhow::bail!("template '{kind}' has no text field '{key}'");
        }
        rt.dispatch(EditorAction::SetText {
            key,
            value: value.to_string(),
        });
    }

    if let Some(path) = &args.background {
        let file = SelectedFile::from_path(path)
            .with_context(|| format!("read background '{}'", path.display()))?;
        rt.dispatch(EditorAction::SelectFile(file));
        fail_on_notice(rt, NoticeSource::Upload)?;
        rt.dispatch(EditorAction::ConfirmPreview);
    }

    let sliders = [
        (ImageControl::Opacity, args.opacity),
        (ImageControl::PositionX, args.x),
        (ImageControl::PositionY, args.y),
        (ImageControl::Scale, args.scale),
    ];
    let wants_sliders = sliders.iter().any(|(_, v)| v.is_some());
    if wants_sliders && !rt.editor().view().image_controls_visible {
        eprintln!("warning: image controls need --background; ignoring them");
        return Ok(());
    }
    for (control, value) in sliders {
        let Some(value) = value else {
            continue;
        };
        let v = ControlRange::for_control(control).clamp(value);
        let action = match control {
            ImageControl::Opacity => EditorAction::SetOpacity(v),
            ImageControl::PositionX => EditorAction::SetPositionX(v as i32),
            ImageControl::PositionY => EditorAction::SetPositionY(v as i32),
            ImageControl::Scale => EditorAction::SetScale(v),
        };
        rt.dispatch(action);
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = load_config(args.cover.config.as_deref())?;
    init_tracing(&config);

    let kind = template_of(&args.cover)?;
    let renderer = renderer_for(&args.cover, &config)?;
    let sink = config.download_sink(args.out_dir.as_deref());
    let mut rt = EditorRuntime::new(kind, renderer, sink);

    apply_edits(&mut rt, &args.cover)?;

    rt.dispatch(EditorAction::Generate);
    fail_on_notice(&rt, NoticeSource::Export)?;
    rt.dispatch(EditorAction::Download);
    print_notices(&rt);
    fail_on_notice(&rt, NoticeSource::Export)?;

    let path = rt
        .sink()
        .path_for(&rt.editor().config().export_filename)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let config = load_config(args.cover.config.as_deref())?;
    init_tracing(&config);

    let kind = template_of(&args.cover)?;
    let renderer = renderer_for(&args.cover, &config)?;
    let mut rt = EditorRuntime::new(kind, renderer, coverkit::InMemoryDownloads::new());
    apply_edits(&mut rt, &args.cover)?;
    print_notices(&rt);

    let frame = rt.render_display()?;
    let png = coverkit::encode_png(&frame)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, png).with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_fields(args: FieldsArgs) -> anyhow::Result<()> {
    let kind = args.template;
    let doc = serde_json::json!({
        "template": kind,
        "route": kind.route(),
        "nav_label": kind.nav_label(),
        "fields": coverkit::schema(kind),
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn cmd_fonts(args: FontsArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.font)
        .with_context(|| format!("read font '{}'", args.font.display()))?;
    let sha = sha256_hex(&bytes);
    let set = FontSet::from_bytes(bytes)
        .with_context(|| format!("register font '{}'", args.font.display()))?;
    println!("family: {}", set.family_name());
    println!("sha256: {sha}");
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        let _ = write!(out, "{b:02x}");
    }
    out
}
