use serde::{Deserialize, Serialize};
use crate::error::ExportError;
use std::fmt;
use std::str::FromStr;

/// Which page layout the document was saved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// "My collection": rows anchored on quantity-owned tooltips.
    #[default]
    Collection,
    /// Set checklist: no tooltips, serials come from the rules table only.
    Checklist,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Collection => "collection",
            Self::Checklist => "checklist",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "collection" => Ok(Self::Collection),
            "checklist" => Ok(Self::Checklist),
            other => Err(ExportError::InvalidInput(format!("unknown mode `{other}`"))),
        }
    }
}

/// Tri-state flag column (Physical / Locked / Wishlist).
///
/// `Unset` renders as an empty cell and is used when icon-only flags are
/// deliberately left out of the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flag {
    Yes,
    #[default]
    No,
    Pending,
    Unset,
}

impl Flag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Pending => "Pending",
            Self::Unset => "",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Flag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Set / subset / year triple shared by every row in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GroupHeader {
    pub set: String,
    pub subset_or_insert: String,
    pub year: String,
    /// Rarity inferred from the header text alone.
    pub rarity: String,
}

/// One exported card row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub title: String,
    pub set: String,
    pub subset_or_insert: String,
    pub card_number: String,
    pub year: String,
    pub rarity: String,
    pub quantity_owned: u32,
    pub subject_points: u32,
    pub combine_needed: u32,
    pub physical: Flag,
    pub locked: Flag,
    pub wishlist: Flag,
    pub serial: String,
    pub raw_text: String,
}

impl CardRecord {
    /// CSV header row, in column order.
    pub const HEADERS: [&'static str; 14] = [
        "Title",
        "Set",
        "Subset/Insert",
        "Card #",
        "Year",
        "Rarity/Parallel",
        "Qty",
        "SubjPoints",
        "CombineNeeded",
        "Physical",
        "Locked",
        "Wishlist",
        "Serial",
        "RawText",
    ];

    /// Cell values matching [`CardRecord::HEADERS`].
    pub fn to_row(&self) -> [String; 14] {
        [
            self.title.clone(),
            self.set.clone(),
            self.subset_or_insert.clone(),
            self.card_number.clone(),
            self.year.clone(),
            self.rarity.clone(),
            self.quantity_owned.to_string(),
            self.subject_points.to_string(),
            self.combine_needed.to_string(),
            self.physical.to_string(),
            self.locked.to_string(),
            self.wishlist.to_string(),
            self.serial.clone(),
            self.raw_text.clone(),
        ]
    }
}

/// Knobs for the extraction pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    pub mode: Mode,
    /// A bare checkmark glyph on the physical icon counts as "Yes".
    pub physical_checkmark_means_yes: bool,
    /// Emit Physical/Locked/Wishlist; when false they are left empty.
    pub icon_flags: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Collection,
            physical_checkmark_means_yes: false,
            icon_flags: true,
        }
    }
}

/// JSON envelope printed by the CLI.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}
