//! Text renderings of the participant list
//!
//! Both views number participants from 1 in store order.

use promo_core::ParticipantRecord;
use std::fmt::Write;

pub const TABLE_FILENAME: &str = "PC_format.txt";
pub const TABLE_CAPTION: &str = "🖥 PC version";
pub const MOBILE_FILENAME: &str = "Mobile_format.txt";
pub const MOBILE_CAPTION: &str = "📱 Mobile version";

const TABLE_HEADER: &str = "No | Ism | Telefon | Kod | Sana\n---|-----|---------|-----|-----\n";

/// Pipe-separated table for wide screens.
pub fn render_table(records: &[ParticipantRecord]) -> String {
    let mut out = String::from(TABLE_HEADER);
    for (i, r) in records.iter().enumerate() {
        let _ = writeln!(
            out,
            "{} | {} | {} | {} | {}",
            i + 1,
            r.name,
            r.phone,
            r.code,
            r.registered_at
        );
    }
    out
}

/// One block per participant for phone screens.
pub fn render_mobile(records: &[ParticipantRecord]) -> String {
    let mut out = String::new();
    for (i, r) in records.iter().enumerate() {
        let _ = write!(
            out,
            " {}.\n Ism: {}\n Tel: {}\n Kod: {}\n Sana: {}\n\n",
            i + 1,
            r.name,
            r.phone,
            r.code,
            r.registered_at
        );
    }
    out
}
