//! User-facing reply text.
//!
//! Every string a member reads lives in this module — the engine only ever
//! hands the router a tagged [`Outcome`]. The voice is the product's own:
//! Arabic, feminine address (the space serves women), with the original
//! emoji conventions.

use rewaqbot_core::command::CommandVerb;
use rewaqbot_core::outcome::Outcome;

/// `/start` greeting.
pub const WELCOME: &str =
    "👋 مرحباً! أنا بوت رِواق، هنا لمساعدتك في تسجيل الحضور. استخدم /help لمعرفة المزيد.";

/// `/help` command reference.
pub const HELP: &str = "مرحباً بكِ في دليل بوت رِواق: \n\
/in <user_id> - تسجيل الدخول.\n\
/out <user_id> - تسجيل الخروج.\n\
/help - عرض دليل بوت رِواق.";

/// Returned instead of forwarding attendance talk to the language model.
pub const USE_COMMANDS: &str = "ℹ️ لتسجيل الحضور استخدمي الأوامر المخصصة:\n\
/in <user_id> عند الوصول\n\
/out <user_id> عند المغادرة";

/// Shown when the language model cannot be reached.
pub const ASSISTANT_DOWN: &str = "⚠️ عذراً، لا أستطيع الإجابة الآن. حاولي مرة أخرى لاحقاً.";

/// Shown for store failures and anything else unexpected.
pub const INTERNAL: &str = "⚠️ An error occurred. Please try again later.";

/// Render an engine outcome into the reply the member reads.
pub fn render(outcome: &Outcome) -> String {
    match outcome {
        Outcome::CheckedIn { display_name } => {
            format!("✅ مرحباً {display_name}، نرجو لكِ يوماً سعيداً ومليئاً بالإنجازات 💙")
        }
        Outcome::CheckedOut { display_name } => {
            format!("✅ تم تسجيل خروجكِ بنجاح، {display_name}. نأمل أن يكون يومكِ مليئاً بالإنجازات. 💙")
        }
        Outcome::AlreadyCheckedIn { .. } => {
            "⚠️ لقد قمتِ بتسجيل الدخول بالفعل اليوم.".to_string()
        }
        Outcome::AlreadyCheckedOut { display_name } => {
            format!("⚠️ لقد قمتِ بتسجيل الخروج بالفعل اليوم، {display_name}.")
        }
        Outcome::NotCheckedIn { display_name } => {
            format!(
                "⚠️ لم تقومي بتسجيل الدخول اليوم، {display_name}. يرجى تسجيل الدخول أولاً باستخدام /in <user_id>."
            )
        }
        Outcome::NotRegistered => "❌ هذا المستخدم غير مسجل في رِواق.".to_string(),
        Outcome::Malformed { verb } => match verb {
            CommandVerb::CheckIn => {
                format!("❌ Please use the format:\n{}", verb.usage())
            }
            CommandVerb::CheckOut => {
                format!("❌ استخدمي الطريقة الصحيحة رجاءً: {}", verb.usage())
            }
        },
        Outcome::Internal => INTERNAL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_replies_name_the_member() {
        let reply = render(&Outcome::CheckedIn {
            display_name: "سارة".into(),
        });
        assert!(reply.contains("سارة"));
        assert!(reply.starts_with('✅'));

        let reply = render(&Outcome::CheckedOut {
            display_name: "سارة".into(),
        });
        assert!(reply.contains("سارة"));
    }

    #[test]
    fn conflict_replies_are_warnings() {
        for outcome in [
            Outcome::AlreadyCheckedIn { display_name: "سارة".into() },
            Outcome::AlreadyCheckedOut { display_name: "سارة".into() },
            Outcome::NotCheckedIn { display_name: "سارة".into() },
        ] {
            assert!(render(&outcome).starts_with('⚠'), "{outcome:?}");
        }
    }

    #[test]
    fn must_check_in_first_names_the_command() {
        let reply = render(&Outcome::NotCheckedIn {
            display_name: "سارة".into(),
        });
        assert!(reply.contains("/in"));
    }

    #[test]
    fn malformed_replies_show_usage() {
        let reply = render(&Outcome::Malformed {
            verb: CommandVerb::CheckIn,
        });
        assert!(reply.contains("/in <user_id>"));

        let reply = render(&Outcome::Malformed {
            verb: CommandVerb::CheckOut,
        });
        assert!(reply.contains("/out <user_id>"));
    }

    #[test]
    fn not_registered_reply_has_no_name() {
        assert_eq!(render(&Outcome::NotRegistered), "❌ هذا المستخدم غير مسجل في رِواق.");
    }
}
