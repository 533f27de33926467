//! Attendance-keyword guard.
//!
//! Free text that talks about checking in or out must never reach the
//! language model — a generated reply could read like a recorded attendance
//! action. Lines the dispatcher did not recognize as commands are screened
//! here and answered with the structured-commands notice instead.

/// Vocabulary that marks a message as attendance-related, in both the
/// members' Arabic and the command tokens themselves.
const ATTENDANCE_KEYWORDS: &[&str] = &[
    "/in",
    "/out",
    "check in",
    "check-in",
    "checkin",
    "check out",
    "check-out",
    "checkout",
    "تسجيل الدخول",
    "تسجيل الخروج",
    "تسجيل دخول",
    "تسجيل خروج",
    "سجلي دخول",
    "سجلي خروج",
    "حضور",
    "انصراف",
];

/// Whether the text mentions attendance and must be kept away from the model.
pub fn mentions_attendance(text: &str) -> bool {
    let lowered = text.to_lowercase();
    ATTENDANCE_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}
