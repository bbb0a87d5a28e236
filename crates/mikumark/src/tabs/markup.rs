//! Tab group HTML.
//!
//! Produces the button row and one pane per tab. Buttons carry
//! `data-tab-group` / `data-tab` so a host page can bind switching; the
//! first button is active and every pane but the first starts hidden.

use std::fmt::Write;

use super::preprocessor::{Tab, TabGroup};
use crate::inline::parse_inline;
use crate::structure::Line;

/// Emit a finished group as markup lines around its tabs' content lines.
pub(super) fn emit_group(group: TabGroup, output: &mut Vec<Line>) {
    let mut header =
        String::from(r#"<div class="MikumarkTab"><div class="MikumarkTabButtonContainer">"#);
    for (idx, tab) in group.tabs.iter().enumerate() {
        write_button(group.id, tab, idx == 0, &mut header);
    }
    header.push_str(r#"</div><div class="MikumarkTabContentContainer">"#);
    output.push(Line::markup(group.line, header));

    for (idx, tab) in group.tabs.into_iter().enumerate() {
        output.push(Line::markup(tab.line, pane_open(group.id, tab.id, idx == 0)));
        output.extend(tab.lines);
        output.push(Line::markup(tab.line, "</div>"));
    }

    output.push(Line::markup(group.line, "</div></div>"));
}

fn write_button(group_id: usize, tab: &Tab, active: bool, out: &mut String) {
    let active = if active { " MikumarkTabActive" } else { "" };
    write!(
        out,
        r#"<div class="MikumarkTabButton MikumarkTabBtnGroup_{group_id} MikumarkTabBtn_{id}{active}" data-tab-group="{group_id}" data-tab="{id}">{title}</div>"#,
        id = tab.id,
        title = parse_inline(&tab.title),
    )
    .unwrap();
}

fn pane_open(group_id: usize, tab_id: usize, visible: bool) -> String {
    let style = if visible {
        ""
    } else {
        r#" style="display: none;""#
    };
    format!(r#"<div class="MikumarkTabContent_{group_id} MikumarkTab_{group_id}_{tab_id}"{style}>"#)
}
