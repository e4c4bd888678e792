use std::fmt::{self, Display, Formatter};
use comfy_table::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use crate::transform::{Access, Plan};

impl Plan {
    /// Render the phases of this plan as a table.
    pub fn display(&self) -> String {
        let p = self.partition;

        let body_access = match self.access {
            Access::Aligned => "🟢 aligned on every stream",
            Access::Unaligned => "🟠 aligned first input, unaligned other streams",
        };
        let body_note = if p.body == 0 { "empty" } else { body_access };

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Phase").set_alignment(CellAlignment::Center),
                Cell::new("Elements").set_alignment(CellAlignment::Center),
                Cell::new("Access").set_alignment(CellAlignment::Center),
            ])
            .add_row(vec![
                Cell::new("Prologue").set_alignment(CellAlignment::Left),
                Cell::new(p.prologue).set_alignment(CellAlignment::Right),
                Cell::new("scalar").set_alignment(CellAlignment::Left),
            ])
            .add_row(vec![
                Cell::new("Body").set_alignment(CellAlignment::Left),
                Cell::new(p.body).set_alignment(CellAlignment::Right),
                Cell::new(body_note).set_alignment(CellAlignment::Left),
            ])
            .add_row(vec![
                Cell::new("Epilogue").set_alignment(CellAlignment::Left),
                Cell::new(p.epilogue).set_alignment(CellAlignment::Right),
                Cell::new("scalar").set_alignment(CellAlignment::Left),
            ])
            .add_row(vec![
                Cell::new("Total").set_alignment(CellAlignment::Left),
                Cell::new(p.len()).set_alignment(CellAlignment::Right),
                Cell::new(""),
            ]);

        table.to_string()
    }
}

impl Display for Plan {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
