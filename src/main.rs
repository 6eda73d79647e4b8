// SPDX-License-Identifier: MPL-2.0
//! `lens-lightbox`: replays a gallery session without a page.
//!
//! Reads a JSON array of item descriptors, then either replays a deep-link
//! fragment or opens the gallery and walks through every item, logging each
//! lifecycle event. A fragment with a scroll threshold (`s=`) fires once one
//! of the simulated `--scroll` positions reaches it.

use lens_lightbox::application::port::WidgetSlot;
use lens_lightbox::config;
use lens_lightbox::domain::media::MediaDescriptor;
use lens_lightbox::gallery::{DeepLink, EventPayload, Lightbox, NavigationOutcome};
use lens_lightbox::i18n::I18n;
use lens_lightbox::infrastructure::{HeadlessStage, HeadlessWidget, TimedBackend};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
lens-lightbox

USAGE:
  lens-lightbox [OPTIONS] <DESCRIPTORS.json>

OPTIONS:
  --lang <CODE>         Language for messages (e.g. en-US, fr)
  --config-dir <DIR>    Directory holding lightbox.toml
  --fragment <FRAG>     Deep-link fragment to replay (e.g. \"#i=last&d=200\")
  --scroll <PX>         Simulated page scroll position, repeatable, in order
  --delay-ms <MS>       Simulated load time per item [default: 100]
  --fail <LABEL>        Make the load of this source fail
  -h, --help            Print help
";

struct Args {
    lang: Option<String>,
    config_dir: Option<PathBuf>,
    fragment: Option<String>,
    scroll: Vec<u32>,
    delay_ms: u64,
    fail: Option<String>,
    descriptors: PathBuf,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    Ok(Some(Args {
        lang: args.opt_value_from_str("--lang")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        fragment: args.opt_value_from_str("--fragment")?,
        scroll: args.values_from_str("--scroll")?,
        delay_ms: args.opt_value_from_str("--delay-ms")?.unwrap_or(100),
        fail: args.opt_value_from_str("--fail")?,
        descriptors: args.free_from_str()?,
    }))
}

fn log_event(payload: &EventPayload) {
    match payload {
        EventPayload::Open => tracing::info!("open"),
        EventPayload::Close => tracing::info!("close"),
        EventPayload::ChangeBefore { from, to } => tracing::info!(
            from = from.as_ref().map(|item| item.key.as_str()),
            to = %to.key,
            "change.before"
        ),
        EventPayload::ChangeAfter { item } => {
            tracing::info!(key = %item.key, index = item.index, kind = %item.kind, "change.after");
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let Some(args) = parse_args()? else {
        print!("{HELP}");
        return Ok(());
    };

    let (config, warning) = config::load_with_override(args.config_dir);
    let i18n = I18n::new(args.lang.as_deref(), &config);
    if let Some(key) = warning {
        tracing::warn!("{}", i18n.tr(&key));
    }
    let readout = I18n::new(args.lang.as_deref(), &config);

    let descriptors: Vec<MediaDescriptor> =
        serde_json::from_str(&std::fs::read_to_string(&args.descriptors)?)?;

    let mut backend = TimedBackend::new(Duration::from_millis(args.delay_ms));
    if let Some(label) = args.fail {
        backend = backend.failing(label);
    }
    let stage = Rc::new(HeadlessStage::new());
    let pagination = HeadlessWidget::new();

    let lightbox = Lightbox::builder(config, Rc::new(backend), stage.clone())
        .widget(WidgetSlot::Pagination, Rc::new(pagination.clone()))
        .i18n(i18n)
        .build()?;
    for name in ["open", "close", "change.before", "change.after"] {
        lightbox.on(name, log_event)?;
    }
    lightbox.feed(&descriptors)?;

    if let Some(fragment) = args.fragment {
        match DeepLink::parse(&fragment) {
            Some(link) if link.scroll_threshold.is_some() => {
                let mut armed = link.arm();
                for position in args.scroll {
                    tracing::debug!(position, "scroll");
                    let outcome = lightbox.scroll(&mut armed, position).await;
                    if armed.has_fired() {
                        tracing::info!(?outcome, position, "deep link replayed");
                        break;
                    }
                }
                if !armed.has_fired() {
                    tracing::warn!("scroll threshold never reached; deep link not replayed");
                }
            }
            Some(link) => {
                let outcome = lightbox.replay(&link).await;
                tracing::info!(?outcome, "deep link replayed");
            }
            None => tracing::warn!(%fragment, "fragment carries no deep-link parameters"),
        }
    } else {
        lightbox.open().await;
        loop {
            match lightbox.next().await {
                NavigationOutcome::Shown(_) => {
                    if let Some((current, total)) = pagination.state().readout {
                        let current = current.to_string();
                        let total = total.to_string();
                        tracing::info!(
                            "{}",
                            readout.tr_with_args(
                                "lightbox-pagination",
                                &[("current", &current), ("total", &total)],
                            )
                        );
                    }
                }
                _ => break,
            }
        }
    }

    lightbox.close().await;
    tracing::info!(mounted = stage.mount_count(), "session finished");
    Ok(())
}
