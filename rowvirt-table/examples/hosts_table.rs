// Example: a large host table with sticky columns, a checkbox column, and a failing renderer.
use rowvirt_table::{
    CellAlign, CellError, CellValue, Column, ListCallbacks, Sticky, VirtualList, VirtualListOptions,
};

struct Host {
    id: u64,
    name: String,
    region: &'static str,
    latency_ms: Option<u32>,
}

fn main() {
    let items: Vec<Host> = (0..250_000u64)
        .map(|id| Host {
            id,
            name: format!("edge-{id:06}"),
            region: ["eu-west", "us-east", "ap-south"][(id % 3) as usize],
            latency_ms: (id % 97 != 0).then_some((id % 400) as u32),
        })
        .collect();

    let columns = vec![
        Column::new("name", "Host", 180, |h: &Host| h.name.as_str().into())
            .sortable()
            .sticky(Sticky::Left),
        Column::new("region", "Region", 100, |h: &Host| h.region.into()).filterable(),
        Column::new("latency", "Latency", 90, |h: &Host| h.latency_ms.into())
            .sortable()
            .align(CellAlign::Right)
            .render(|v, _, _| match v {
                CellValue::Int(ms) => Ok(format!("{ms} ms")),
                _ => Err(CellError::new("no samples")),
            }),
    ];

    let list = VirtualList::new(
        items,
        VirtualListOptions::fixed(28, |h: &Host, _| h.id)
            .with_viewport_height(560)
            .with_overscan(3)
            .with_columns(columns)
            .with_selection_column(28)
            .with_empty_state("No hosts match")
            .with_callbacks(
                ListCallbacks::new()
                    .with_on_items_rendered(|start, end| println!("items rendered: {start}..={end}"))
                    .with_on_render_error(|err| eprintln!("render error: {err}")),
            ),
    );
    let mut list = match list {
        Ok(list) => list,
        Err(err) => {
            eprintln!("invalid columns: {err}");
            return;
        }
    };

    list.on_scroll(2_700);
    let frame = list.frame();
    println!(
        "total_height={} content_width={} rows={}",
        frame.total_height,
        frame.content_width,
        frame.rows.len()
    );
    for row in frame.rows.iter().take(5) {
        let cells: Vec<&str> = row.cells.iter().map(|c| c.content.as_str()).collect();
        println!("#{:>6} top={:>6} {:?}", row.index, row.top, cells);
    }

    let _ = list.scroll_to(249_999);
    println!("after scroll_to: {:?}", list.visible_range());
}
