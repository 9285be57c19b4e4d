//! Static translation tables.
//!
//! English is complete and acts as the fallback; the other languages
//! translate a subset of the keys.

use crate::state::preferences::Language;

const EN: &[(&str, &str)] = &[
    ("auth.signIn", "Sign In"),
    ("auth.register", "Register"),
    ("auth.myAccount", "My Account"),
    ("auth.logout", "Logout"),
    ("auth.loginSuccess", "Login successful"),
    ("auth.welcomeBack", "Welcome back to {{brand}}!"),
    ("auth.loginFailed", "Login failed"),
    ("auth.checkCredentials", "Please check your email and password"),
    ("auth.loggedOut", "Logged out"),
    ("auth.loggedOutDescription", "You have been logged out successfully"),
    ("header.balance", "Balance"),
    ("header.deposit", "Deposit"),
    ("header.notifications", "You have {{count}} unread notifications"),
    ("games.all", "All Games"),
    ("games.hot", "Hot"),
    ("games.new", "New"),
    ("games.empty", "No games found in this category"),
    ("allGamesPage.searchPlaceholder", "Search games"),
    ("tokens.title", "Token Prices"),
    ("winners.title", "Recent Winners"),
    ("winners.won", "{{username}} won {{amount}} on {{game}}"),
];

const ZH: &[(&str, &str)] = &[
    ("auth.signIn", "登录"),
    ("auth.register", "注册"),
    ("auth.myAccount", "我的账户"),
    ("auth.logout", "退出"),
    ("auth.loginSuccess", "登录成功"),
    ("auth.welcomeBack", "欢迎回到 {{brand}}！"),
    ("auth.loginFailed", "登录失败"),
    ("auth.checkCredentials", "请检查您的邮箱和密码"),
    ("auth.loggedOut", "已退出"),
    ("auth.loggedOutDescription", "您已成功退出登录"),
    ("header.balance", "余额"),
    ("header.deposit", "存款"),
    ("header.notifications", "您有 {{count}} 条未读通知"),
    ("games.all", "所有游戏"),
    ("games.hot", "热门"),
    ("games.new", "新游戏"),
    ("games.empty", "该分类下没有游戏"),
    ("allGamesPage.searchPlaceholder", "搜索游戏"),
    ("tokens.title", "代币价格"),
    ("winners.title", "最近赢家"),
    ("winners.won", "{{username}} 在 {{game}} 赢得 {{amount}}"),
];

const MS: &[(&str, &str)] = &[
    ("auth.signIn", "Log Masuk"),
    ("auth.register", "Daftar"),
    ("auth.logout", "Log Keluar"),
    ("auth.loginSuccess", "Log masuk berjaya"),
    ("auth.welcomeBack", "Selamat kembali ke {{brand}}!"),
    ("auth.loginFailed", "Log masuk gagal"),
    ("header.balance", "Baki"),
    ("games.all", "Semua Permainan"),
    ("allGamesPage.searchPlaceholder", "Cari permainan"),
];

const TH: &[(&str, &str)] = &[
    ("auth.signIn", "เข้าสู่ระบบ"),
    ("auth.logout", "ออกจากระบบ"),
    ("games.all", "เกมทั้งหมด"),
];

/// Returns the table of `language`.
pub(crate) fn table(language: Language) -> &'static [(&'static str, &'static str)] {
    match language {
        Language::En => EN,
        Language::Zh => ZH,
        Language::Ms => MS,
        Language::Th => TH,
    }
}

/// Looks `key` up in the table of `language` only.
pub(crate) fn lookup(language: Language, key: &str) -> Option<&'static str> {
    table(language)
        .iter()
        .find_map(|(candidate, text)| (*candidate == key).then_some(*text))
}
