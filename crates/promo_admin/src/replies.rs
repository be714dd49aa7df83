//! Operator-facing replies for admin outcomes

use crate::error::AdminError;
use crate::render::{MOBILE_CAPTION, MOBILE_FILENAME, TABLE_CAPTION, TABLE_FILENAME};
use crate::service::{CountOutcome, ListOutcome, RemoveOutcome, WinnerOutcome};
use promo_core::Reply;

pub const PERMISSION_DENIED: &str = "❌ Sizda ruxsat yo'q.";
pub const GENERIC_FAILURE: &str =
    "❌ Xatolik yuz berdi. Iltimos, keyinroq urinib ko'ring yoki adminga murojaat qiling.";

pub fn count(outcome: &CountOutcome) -> Vec<Reply> {
    let text = match outcome {
        CountOutcome::Empty => "📭 Hali hech kim ro'yxatdan o'tmagan.".to_string(),
        CountOutcome::Total(total) => format!("📊 Jami ro'yxatdan o'tganlar soni: {total}"),
    };
    vec![Reply::text(text)]
}

/// The two listing documents; nothing is kept once they are handed over.
pub fn list(outcome: ListOutcome) -> Vec<Reply> {
    match outcome {
        ListOutcome::NoList => vec![Reply::text("⚠️ Ro'yxat hali yo'q.")],
        ListOutcome::Empty => vec![Reply::text("📭 Hozircha hech kim ro'yxatdan o'tmagan.")],
        ListOutcome::Exported(export) => vec![
            Reply::document(TABLE_FILENAME, TABLE_CAPTION, export.table),
            Reply::document(MOBILE_FILENAME, MOBILE_CAPTION, export.mobile),
        ],
    }
}

pub fn remove(outcome: &RemoveOutcome) -> Vec<Reply> {
    let reply = match outcome {
        RemoveOutcome::Usage => Reply::markdown(
            "🗑 Kodni yoki `all` yozing:\nMisol: `/remove USMONXXXX` yoki `/remove all`",
        ),
        RemoveOutcome::NoList => Reply::text("⚠️ Ro'yxat topilmadi."),
        RemoveOutcome::AllRemoved => Reply::text("✅ Barcha foydalanuvchilar o'chirildi."),
        RemoveOutcome::Removed(code) => Reply::markdown(format!("🗑 Kod `{code}` o'chirildi.")),
        RemoveOutcome::NotFound(_) => Reply::text("❌ Kod topilmadi."),
    };
    vec![reply]
}

pub fn winner(outcome: &WinnerOutcome) -> Vec<Reply> {
    let reply = match outcome {
        WinnerOutcome::NoList => Reply::text("⚠️ Ro'yxat topilmadi."),
        WinnerOutcome::Empty => Reply::text("⚠️ Ro'yxatda hech kim yo'q."),
        WinnerOutcome::Drawn(r) => Reply::markdown(format!(
            "🎉 G'olib:\n\n🧑‍💼 Ism: *{}*\n📞 Tel: `{}`\n🆔 Kod: `{}`\n📅 Sana: {}",
            r.name, r.phone, r.code, r.registered_at
        )),
    };
    vec![reply]
}

/// Failure reply. Storage details are only shown to the operator.
pub fn error(error: &AdminError, is_operator: bool) -> Vec<Reply> {
    let reply = match error {
        AdminError::PermissionDenied(_) => Reply::text(PERMISSION_DENIED),
        AdminError::StorageError(e) if is_operator => Reply::text(format!("❌ Xatolik: {e}")),
        AdminError::StorageError(_) => Reply::text(GENERIC_FAILURE),
    };
    vec![reply]
}
