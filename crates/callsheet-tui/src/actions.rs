use anyhow::{anyhow, Result};
use callsheet_core::domain::{HotelContactUpdate, HotelId, NewHotelContact, ResponseStatus};
use callsheet_core::{Dialer, RosterStore};

use crate::app::App;

#[derive(Debug, Clone)]
pub enum Action {
    Refresh,
    AddHotel(NewHotelContact),
    UpdateHotel(HotelId, HotelContactUpdate),
    DeleteHotel(HotelId),
    SetStatus(HotelId, ResponseStatus),
    CallHotel(HotelId),
    CallNext,
    CallSelected,
}

pub fn execute_action(
    app: &mut App,
    store: &mut RosterStore,
    dialer: &mut dyn Dialer,
    action: Action,
) -> Result<()> {
    match action {
        Action::Refresh => {
            app.selection.retain_existing(store);
            app.apply_rows(store.rows(), store.summary());
        }
        Action::AddHotel(fields) => {
            let hotel = store.add(fields);
            app.set_status(format!("Added {}", hotel.name));
            app.pending_select = Some(hotel.id);
            app.enqueue(Action::Refresh);
        }
        Action::UpdateHotel(id, update) => {
            let hotel = store
                .update(id, update)
                .ok_or_else(|| anyhow!("hotel {} not found", id))?;
            app.set_status(format!("Updated {}", hotel.name));
            app.enqueue(Action::Refresh);
        }
        Action::DeleteHotel(id) => {
            let index = store.index_of(id);
            let removed = store
                .delete_and_prune(id, &mut app.selection)
                .ok_or_else(|| anyhow!("hotel {} not found", id))?;
            if let Some(index) = index {
                app.cursor.on_deleted(index);
            }
            app.dial_queue.retain(|queued| *queued != id);
            app.set_status(format!("Deleted {}", removed.name));
            app.enqueue(Action::Refresh);
        }
        Action::SetStatus(id, status) => {
            if !store.set_response_status(id, status) {
                return Err(anyhow!("hotel {} not found", id));
            }
            app.set_status(format!("Marked {}", status.label()));
            app.enqueue(Action::Refresh);
        }
        Action::CallHotel(id) => {
            let hotel = store
                .get(id)
                .ok_or_else(|| anyhow!("hotel {} not found", id))?;
            let dial_string = store.dial_target(hotel)?;
            dialer.dial(&dial_string)?;
            app.clear_error();
            app.set_status(format!("Calling {} ({})", hotel.name, dial_string));
        }
        Action::CallNext => match app.cursor.advance(store) {
            Some(index) => {
                let hotel = store
                    .get_index(index)
                    .ok_or_else(|| anyhow!("no hotel at row {}", index + 1))?;
                let dial_string = store.dial_target(hotel)?;
                dialer.dial(&dial_string)?;
                app.clear_error();
                app.set_status(format!("Calling {} ({})", hotel.name, dial_string));
            }
            None => app.set_status("No more hotels to call. Press N to start over."),
        },
        Action::CallSelected => {
            if app.dial_queue.is_empty() {
                let targets = store.call_target_ids(&app.selection);
                if targets.is_empty() {
                    app.set_status("No callable hotels selected");
                    return Ok(());
                }
                app.dial_queue.extend(targets);
                app.selection.clear();
            }
            // Queued hotels may have been edited or deleted since they were
            // queued; resolve the number now and skip what no longer dials.
            while let Some(id) = app.dial_queue.pop_front() {
                let Some(hotel) = store.get(id) else {
                    continue;
                };
                let Ok(dial_string) = store.dial_target(hotel) else {
                    continue;
                };
                dialer.dial(&dial_string)?;
                app.clear_error();
                app.set_status(format!(
                    "Calling {} ({}, {} queued)",
                    hotel.name,
                    dial_string,
                    app.dial_queue.len()
                ));
                return Ok(());
            }
            app.set_status("No callable hotels left in the queue");
        }
    }

    Ok(())
}
