use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::parse_hotel_id;
use anyhow::{Context as _, Result};
use callsheet_core::dto::HotelRowDto;
use callsheet_core::{tel_uri, Selection};
use clap::Args;
use serde::Serialize;
use tracing::warn;
use url::Url;

#[derive(Debug, Args)]
pub struct NextArgs {
    /// Roster position of the last hotel dialed (0-based)
    #[arg(long)]
    pub after: Option<usize>,
}

#[derive(Debug, Args)]
pub struct TargetsArgs {
    #[arg(required = true, value_name = "ID")]
    pub ids: Vec<String>,
    /// Print tel: URIs instead of raw dial strings
    #[arg(long)]
    pub uri: bool,
}

#[derive(Debug, Args)]
pub struct DialArgs {
    pub id: String,
    /// Print the tel: URI without invoking the dialer
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
struct NextOutput {
    index: Option<usize>,
    hotel: Option<HotelRowDto>,
}

#[derive(Debug, Serialize)]
struct DialOutput {
    id: u32,
    name: String,
    uri: String,
    dialed: bool,
}

pub fn next_callable(ctx: &Context<'_>, args: NextArgs) -> Result<()> {
    let index = ctx.store.next_callable(args.after);
    let hotel = index.and_then(|index| ctx.store.rows().into_iter().nth(index));

    if ctx.json {
        return print_json(&NextOutput { index, hotel });
    }

    match hotel {
        Some(row) => println!(
            "{}  {}  {}  {}",
            row.position,
            row.id,
            row.name,
            row.dial_string.unwrap_or_default()
        ),
        None => println!("no callable hotel left"),
    }
    Ok(())
}

pub fn call_targets(ctx: &Context<'_>, args: TargetsArgs) -> Result<()> {
    let ids = args
        .ids
        .iter()
        .map(|raw| parse_hotel_id(raw))
        .collect::<Result<Vec<_>>>()?;
    let mut selection = Selection::from_ids(ids.iter().copied());
    selection.retain_existing(ctx.store);
    for id in ids.iter().filter(|id| !selection.contains(**id)) {
        warn!(id = %id, "ignoring unknown hotel id");
    }

    let mut targets = ctx.store.call_targets(&selection);
    if args.uri {
        targets = targets
            .iter()
            .map(|target| tel_uri(target))
            .collect::<Result<Vec<_>, _>>()?;
    }

    if ctx.json {
        return print_json(&targets);
    }
    for target in targets {
        println!("{}", target);
    }
    Ok(())
}

pub fn dial(ctx: &Context<'_>, args: DialArgs) -> Result<()> {
    let id = parse_hotel_id(&args.id)?;
    let hotel = ctx
        .store
        .get(id)
        .ok_or_else(|| not_found(format!("hotel {}", id)))?;
    let dial_string = ctx
        .store
        .dial_target(hotel)
        .map_err(|_| invalid_input(format!("hotel {} has no phone number", id)))?;
    let uri = Url::parse(&tel_uri(&dial_string)?)
        .with_context(|| format!("build tel uri for {}", dial_string))?;

    let dialed = if args.dry_run {
        false
    } else {
        let mut dialer = ctx.config.dialer.build();
        dialer
            .dial(&dial_string)
            .with_context(|| format!("dial {}", hotel.name))?;
        true
    };

    if ctx.json {
        return print_json(&DialOutput {
            id: id.get(),
            name: hotel.name.clone(),
            uri: uri.to_string(),
            dialed,
        });
    }

    if dialed {
        println!("dialing {} ({})", hotel.name, uri);
    } else {
        println!("{}", uri);
    }
    Ok(())
}
