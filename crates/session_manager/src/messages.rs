//! Localized replies for the registration conversation

use promo_core::{KeyButton, Keyboard, Reply};
use registration_state::Language;

pub const WELCOME: &str = "🎉 USMON OTA sovrinli o'yini botiga xush kelibsiz!";
pub const CHOOSE_LANGUAGE: &str = "Tilni tanlang / Выберите язык:";
pub const SHARE_CONTACT_BUTTON: &str = "📞 Raqamni yuborish / Отправить номер";
pub const CANCELLED: &str = "❌ Jarayon bekor qilindi / Процесс отменен.";

pub fn welcome() -> Reply {
    Reply::text(WELCOME)
}

pub fn choose_language() -> Reply {
    let row = Language::ALL
        .into_iter()
        .map(|lang| KeyButton::text(lang.button_label()))
        .collect();
    Reply::text(CHOOSE_LANGUAGE).with_keyboard(Keyboard::Buttons { rows: vec![row] })
}

pub fn ask_name(language: Language) -> Reply {
    let text = match language {
        Language::Uz => "Iltimos, ism va familiyangizni kiriting:",
        Language::Ru => "Пожалуйста, введите ваше имя и фамилию:",
    };
    Reply::text(text).with_keyboard(Keyboard::Remove)
}

pub fn ask_phone(language: Language, name: &str) -> Reply {
    let text = match language {
        Language::Uz => format!("{name}, endi telefon raqamingizni yuboring:"),
        Language::Ru => format!("{name}, теперь отправьте ваш номер телефона:"),
    };
    Reply::text(text).with_keyboard(Keyboard::Buttons {
        rows: vec![vec![KeyButton::contact(SHARE_CONTACT_BUTTON)]],
    })
}

pub fn invalid_phone(language: Language) -> Reply {
    let text = match language {
        Language::Uz => {
            "❌ Iltimos, faqat telefon raqamingizni yuboring yoki '📞 Raqamni yuborish' tugmasidan foydalaning."
        }
        Language::Ru => {
            "❌ Пожалуйста, отправьте только свой номер телефона или используйте кнопку '📞 Отправить номер'."
        }
    };
    Reply::text(text)
}

pub fn registered(language: Language, name: &str, code: &str) -> Reply {
    let text = match language {
        Language::Uz => format!(
            "✅ {name}, siz ro'yxatdan o'tdingiz!\nSizning unikal kodingiz: *{code}*\n\
             Ushbu kodni restoranda ko'rsating va sovrin yutish imkoniyatiga ega bo'ling! 🎁"
        ),
        Language::Ru => format!(
            "✅ {name}, вы успешно зарегистрированы!\nВаш уникальный код: *{code}*\n\
             Покажите этот код в ресторане и получите шанс выиграть приз! 🎁"
        ),
    };
    Reply::markdown(text).with_keyboard(Keyboard::Remove)
}

/// Shown when the record could not be stored. Names both ways out.
pub fn registration_failed(operator_contact: &str) -> Reply {
    Reply::text(format!(
        "❌ Afsuski, biror narsa noto'g'ri ishladi.\n\
         Iltimos, /start buyrug'i bilan qaytadan boshlang yoki adminga murojaat qiling: {operator_contact}\n\n\
         ❌ Что-то пошло не так. Пожалуйста, начните заново с /start или обратитесь к администратору: {operator_contact}"
    ))
    .with_keyboard(Keyboard::Remove)
}

pub fn cancelled() -> Reply {
    Reply::text(CANCELLED).with_keyboard(Keyboard::Remove)
}
