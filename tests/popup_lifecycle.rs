use popmenu::popup::{
    MenuItem, PopupMenu, PopupMenuWidget, PopupState, PopupTheme, PositionClass, ResourceTable,
};
use ratatui::{buffer::Buffer, layout::Rect};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

const A: i32 = 1;
const B: i32 = 2;
const C: i32 = 3;

fn entries() -> Vec<MenuItem> {
    vec![MenuItem::new(A), MenuItem::with_icon(42, B), MenuItem::new(C)]
}

#[test]
fn three_entry_menu_binds_and_clicks() {
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&clicks);
    let mut menu = PopupMenu::new()
        .show_icon(true)
        .add_menu_items(entries())
        .on_menu_item_click(move |pos, item| sink.borrow_mut().push((pos, item.clone())));

    assert!(menu.show_as_dropdown(Rect::new(0, 0, 8, 1)));
    assert_eq!(menu.state(), PopupState::Visible);

    let adapter = &menu.overlay().unwrap().adapter;
    let rows: Vec<_> = adapter.bind_all().map(|r| (r.icon, r.class)).collect();
    assert_eq!(
        rows,
        vec![
            (None, PositionClass::Top),
            (Some(42), PositionClass::Middle),
            (None, PositionClass::Bottom),
        ]
    );

    assert!(menu.click_row(1));
    assert_eq!(*clicks.borrow(), vec![(1, MenuItem::with_icon(42, B))]);
    assert_eq!(menu.state(), PopupState::Hidden);
}

#[test]
fn single_entry_gets_top_style() {
    let mut menu = PopupMenu::new().add_menu_item(MenuItem::new(A));
    let overlay = menu.build();
    assert_eq!(overlay.adapter.bind(0).unwrap().class, PositionClass::Top);
}

#[test]
fn click_listener_may_reopen_through_a_channel() {
    // The listener runs after the popup closed, so a host can reopen it.
    let (tx, rx) = std::sync::mpsc::channel();
    let mut menu = PopupMenu::new()
        .add_menu_items(entries())
        .on_menu_item_click(move |pos, _| tx.send(pos).unwrap());

    menu.show_as_dropdown(Rect::new(0, 0, 8, 1));
    menu.click_row(2);
    let reopen_for = rx.try_recv().unwrap();
    assert_eq!(reopen_for, 2);
    assert!(menu.show_as_dropdown(Rect::new(0, 0, 8, 1)));
}

#[test]
fn full_show_render_dismiss_cycle() {
    let table = ResourceTable::new()
        .with_text(A, "Open")
        .with_text(B, "Save")
        .with_text(C, "Quit")
        .with_icon(42, "#");
    let theme = PopupTheme::default();
    let widget = PopupMenuWidget::new(&table, &theme);
    let area = Rect::new(0, 0, 40, 12);
    let mut menu = PopupMenu::new().add_menu_items(entries());

    let t0 = Instant::now();
    menu.show_as_dropdown(Rect::new(2, 0, 8, 1));
    menu.tick(t0);
    let mut buf = Buffer::empty(area);
    widget.render_to_buffer(area, &mut buf, &mut menu, t0 + Duration::from_secs(1));
    assert!(menu.overlay().unwrap().window.area().is_some());

    menu.tick(t0 + Duration::from_millis(240));
    assert_eq!(menu.backdrop().alpha(), 0.75);

    assert!(menu.dismiss());
    assert!(!menu.dismiss());
    menu.tick(t0 + Duration::from_millis(300));
    menu.tick(t0 + Duration::from_millis(700));
    assert_eq!(menu.backdrop().alpha(), 1.0);

    let mut after = Buffer::empty(area);
    widget.render_to_buffer(area, &mut after, &mut menu, t0 + Duration::from_secs(2));
    assert_eq!(after, Buffer::empty(area));
}
