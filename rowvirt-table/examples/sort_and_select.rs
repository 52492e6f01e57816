// Example: the host owns sorting. Header clicks come back as sort requests, the host sorts
// and hands the new snapshot back, keeping the top row anchored.
use std::sync::{Arc, Mutex};

use rowvirt_table::{
    Column, ListCallbacks, SortDirection, VirtualList, VirtualListOptions,
};

#[derive(Clone)]
struct Ticket {
    id: u32,
    priority: u8,
}

fn main() {
    let tickets: Vec<Ticket> = (0..10_000u32)
        .map(|id| Ticket {
            id,
            priority: (id.wrapping_mul(2_654_435_761) >> 28) as u8,
        })
        .collect();

    let pending = Arc::new(Mutex::new(None::<(String, SortDirection)>));
    let sink = Arc::clone(&pending);

    let columns = vec![
        Column::new("id", "#", 60, |t: &Ticket| t.id.into()).sortable(),
        Column::new("priority", "Priority", 80, |t: &Ticket| (t.priority as u32).into()).sortable(),
    ];
    let mut list = match VirtualList::new(
        tickets,
        VirtualListOptions::fixed(24, |t: &Ticket, _| t.id)
            .with_viewport_height(480)
            .with_columns(columns)
            .with_selection_column(24)
            .with_callbacks(
                ListCallbacks::new()
                    .with_on_sort(move |key, dir| {
                        if let Ok(mut slot) = sink.lock() {
                            *slot = Some((key.to_string(), dir));
                        }
                    })
                    .with_on_selection_change(|set| println!("selected: {}", set.len()))
                    .with_on_scroll_request(|offset| println!("scroll container to {offset}")),
            ),
    ) {
        Ok(list) => list,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };

    list.on_scroll(24 * 500);
    list.select_row(505, true);
    list.select_range(&510);

    for _ in 0..2 {
        list.request_sort("priority");
        let request = pending.lock().ok().and_then(|mut slot| slot.take());
        if let Some((_, direction)) = request {
            let mut sorted = list.items().to_vec();
            sorted.sort_by_key(|t| (t.priority, t.id));
            if direction == SortDirection::Desc {
                sorted.reverse();
            }
            let offset = list.set_items_anchored(sorted);
            println!("sorted {direction:?}, anchored offset {offset:?}");
        }
    }

    println!("visible: {:?}", list.visible_range());
    println!("header: {:?}", list.header().iter().map(|h| (&h.title, h.sort)).collect::<Vec<_>>());
}
