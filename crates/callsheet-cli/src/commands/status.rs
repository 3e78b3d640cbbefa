use crate::commands::{print_json, Context};
use crate::util::{format_phone, or_dash, parse_status};
use anyhow::Result;
use callsheet_core::dto::{HotelRowDto, StatusViewDto};
use clap::Args;

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Only show hotels with this response status
    #[arg(long, value_name = "STATUS")]
    pub status: Option<String>,
    /// Only show hotels that have a phone number
    #[arg(long)]
    pub callable: bool,
}

pub fn show_status(ctx: &Context<'_>, args: StatusArgs) -> Result<()> {
    let status = args.status.as_deref().map(parse_status).transpose()?;
    let hotels: Vec<HotelRowDto> = ctx
        .store
        .rows()
        .into_iter()
        .filter(|row| status.map_or(true, |wanted| row.response_status == wanted))
        .filter(|row| !args.callable || row.callable)
        .collect();
    let view = StatusViewDto {
        hotels,
        summary: ctx.store.summary(),
    };

    if ctx.json {
        return print_json(&view);
    }

    if view.hotels.is_empty() {
        println!("no hotels");
    }

    for row in &view.hotels {
        println!(
            "{}  {}  {}  {}  [{}]  {}",
            row.id,
            or_dash(&row.name),
            format_phone(row),
            or_dash(&row.address),
            row.status_label,
            or_dash(&row.conversation)
        );
    }

    let counts = view
        .summary
        .by_status
        .iter()
        .map(|entry| format!("{}: {}", entry.label, entry.count))
        .collect::<Vec<_>>()
        .join("  ");
    println!(
        "{} hotels, {} callable  {}",
        view.summary.total, view.summary.callable, counts
    );
    Ok(())
}
