use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

regex!(NON_PRINTABLE, r"[\p{Cc}\p{Cf}\p{Co}\p{Cn}]");
regex!(LINE_BREAK, r"([\p{P}>])?\n");
regex!(QUOTES, r#"["']"#);
regex!(STRIP_EXTENSION, r"\.[^/?#]{2,63}$");

// Author names
regex!(AUTHOR_URL, r"(?i)^http");
regex!(AUTHOR_EMAIL, r"^\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b");
// A second escape is only captured when it is a low surrogate.
regex!(AUTHOR_UNICODE_ESCAPE, r"\\u([0-9a-fA-F]{4})(?:\\u([dD][c-fC-F][0-9a-fA-F]{2}))?");
regex!(AUTHOR_REMOVE_HTML, r"<[^>]+>");
regex!(AUTHOR_SPLIT, r"(?i)/|;|,|\||&|(?:^|\W)[u|a]nd(?:$|\W)");
regex!(
    AUTHOR_EMOJI_REMOVE,
    r"[\x{2700}-\x{27BF}\x{1F600}-\x{1F64F}\x{2600}-\x{26FF}\x{1F300}-\x{1F5FF}\x{1F900}-\x{1F9FF}\x{1FA70}-\x{1FAFF}\x{1F680}-\x{1F6FF}]+"
);
regex!(AUTHOR_TWITTER, r"@\w+");
regex!(AUTHOR_REPLACE_JOIN, r"[._+]");
regex!(AUTHOR_REMOVE_NICKNAME, r#"["‘({\[’'][^"]+?[‘’"')\]}]"#);
regex!(AUTHOR_REMOVE_SPECIAL, r"[^\w]+$|[:()?*$#!%/<>{}~¿]");
regex!(AUTHOR_PREFIX, r"(?i)^([a-zäöüß]+(ed|t))? ?(written by|words by|words|by|von|from) ");
regex!(AUTHOR_REMOVE_NUMBERS, r"\d.+?$");
regex!(AUTHOR_REMOVE_PREPOSITION, r"(?i)\b\s+(am|on|for|at|in|to|from|of|via|with|—|-|–)\s+(.*)");
