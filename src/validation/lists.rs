//! Static reference tables used by the validators.
//!
//! The tables are plain data so they can be reviewed and updated without
//! touching validation logic. Validators never read these statics directly;
//! they go through the rule structs ([`crate::validation::DomainRules`],
//! [`crate::validation::UrlRules`], [`crate::validation::SlugRules`]) whose
//! `Default` implementations are built from here, so tests and callers can
//! inject their own lists.

/// Domains owned by the service itself. They and all their subdomains are
/// never accepted as customer domains.
pub const RESERVED_DOMAINS: &[&str] = &["glynk.to", "goodlink.ai"];

/// Second-level registration suffixes that behave like a TLD.
///
/// `shop.co.il` is a registrable domain with no subdomain, while
/// `shop.example.com` has one.
pub const TWO_PART_TLDS: &[&str] = &[
    // Israel
    "co.il", "org.il", "net.il", "ac.il", "gov.il", "muni.il", "k12.il",
    // United Kingdom
    "co.uk", "org.uk", "me.uk", "ltd.uk", "plc.uk", "net.uk", "sch.uk", "ac.uk", "gov.uk",
    "nhs.uk", "police.uk",
    // Australia
    "com.au", "net.au", "org.au", "edu.au", "gov.au", "asn.au", "id.au",
    // New Zealand
    "co.nz", "net.nz", "org.nz", "ac.nz", "govt.nz", "geek.nz",
    // Japan
    "co.jp", "ne.jp", "or.jp", "ac.jp", "go.jp", "gr.jp",
    // South Korea
    "co.kr", "ne.kr", "or.kr", "ac.kr", "go.kr",
    // Brazil
    "com.br", "net.br", "org.br", "gov.br", "edu.br",
    // India
    "co.in", "net.in", "org.in", "firm.in", "gen.in", "ind.in", "ac.in", "edu.in", "gov.in",
    // South Africa
    "co.za", "org.za", "net.za", "gov.za", "ac.za", "web.za",
    // Mexico, Argentina, Colombia, Peru, Chile
    "com.mx", "org.mx", "gob.mx", "edu.mx",
    "com.ar", "org.ar", "net.ar", "gob.ar",
    "com.co", "org.co", "net.co", "gov.co",
    "com.pe", "org.pe", "gob.pe",
    "gob.cl",
    // China, Hong Kong, Taiwan, Singapore, Malaysia
    "com.cn", "net.cn", "org.cn", "gov.cn", "edu.cn",
    "com.hk", "org.hk", "net.hk", "edu.hk", "gov.hk",
    "com.tw", "org.tw", "net.tw", "edu.tw", "gov.tw",
    "com.sg", "org.sg", "net.sg", "edu.sg", "gov.sg",
    "com.my", "org.my", "net.my", "edu.my", "gov.my",
    // Turkey, Ukraine, Russia
    "com.tr", "org.tr", "net.tr", "gen.tr", "edu.tr", "gov.tr",
    "com.ua", "org.ua", "net.ua", "in.ua", "kiev.ua",
    "com.ru", "org.ru", "net.ru", "msk.ru", "spb.ru",
    // Misc
    "com.pl", "net.pl", "org.pl",
    "co.at", "or.at",
    "com.es", "org.es", "nom.es",
    "com.gr", "org.gr",
    "com.pt", "org.pt",
    "com.eg", "org.eg",
    "com.sa", "org.sa",
    "com.ng", "org.ng",
    "co.ke", "or.ke",
    "co.th", "in.th", "or.th", "ac.th", "go.th",
    "com.vn", "net.vn", "org.vn",
    "com.ph", "net.ph", "org.ph",
    "co.id", "or.id", "web.id", "ac.id", "go.id",
    "com.pk", "org.pk", "net.pk",
];

/// Top-level domains accepted for hosts made of exactly two labels.
pub const KNOWN_TLDS: &[&str] = &[
    // Generic
    "com", "org", "net", "edu", "gov", "mil", "int", "info", "biz", "name", "pro", "aero",
    "coop", "museum", "mobi", "asia", "tel", "travel", "jobs", "cat",
    // Popular new generic
    "io", "co", "ai", "app", "dev", "me", "tv", "xyz", "online", "site", "store", "shop",
    "tech", "blog", "cloud", "link", "live", "news", "club", "space", "website", "digital",
    "agency", "studio", "design", "media", "email", "page", "world", "life", "today", "top",
    "one", "art", "fun", "games", "social", "network", "systems", "solutions", "services",
    "company", "group", "global", "marketing", "ventures", "capital", "finance", "money",
    "academy", "school", "health", "care", "fit", "bio", "eco", "green", "earth", "land",
    "city", "events", "tickets", "photo", "photos", "video", "music", "audio", "radio",
    "film", "movie", "book", "guru", "ninja", "rocks", "wiki", "works", "zone", "chat",
    "team", "tools", "plus", "run", "gg", "to", "ly", "sh", "fm", "am", "so", "is", "it",
    // Country codes
    "ac", "ad", "ae", "af", "ag", "al", "ar", "as", "at", "au", "az", "ba", "bd", "be",
    "bg", "bh", "bo", "br", "by", "bz", "ca", "cc", "ch", "cl", "cn", "cr", "cu", "cy",
    "cz", "de", "dk", "do", "dz", "ec", "ee", "eg", "es", "eu", "fi", "fr", "ge", "gh",
    "gr", "gt", "hk", "hn", "hr", "hu", "id", "ie", "il", "in", "iq", "ir", "jm", "jo",
    "jp", "ke", "kg", "kr", "kw", "kz", "la", "lb", "li", "lk", "lt", "lu", "lv", "ma",
    "md", "mk", "mn", "mt", "mx", "my", "ng", "ni", "nl", "no", "np", "nz", "om", "pa",
    "pe", "ph", "pk", "pl", "pr", "ps", "pt", "py", "qa", "ro", "rs", "ru", "sa", "se",
    "sg", "si", "sk", "sv", "th", "tn", "tr", "tw", "tz", "ua", "ug", "uk", "us", "uy",
    "uz", "ve", "vn", "ws", "za", "zm", "zw",
];

/// Generic TLD labels that commonly appear as the second level of a
/// country-code registration (`example.com.au`).
pub const GENERIC_TLDS: &[&str] = &[
    "com", "net", "org", "edu", "gov", "mil", "info", "biz", "co",
];

/// `generic.cc` endings that are real registries. Any other
/// `<generic>.<2 letters>` ending is treated as a spoofing attempt
/// (`paypal.com.xy`).
pub const LEGITIMATE_TLD_PAIRS: &[&str] = &[
    "com.au", "net.au", "org.au", "edu.au", "gov.au",
    "co.uk", "org.uk", "gov.uk",
    "co.il", "org.il", "net.il", "gov.il",
    "co.nz", "org.nz", "net.nz",
    "co.jp", "co.kr", "co.in", "co.za", "co.id", "co.th", "co.ke", "co.at",
    "com.br", "net.br", "org.br", "gov.br", "edu.br",
    "com.mx", "org.mx", "edu.mx",
    "com.ar", "org.ar", "net.ar",
    "com.co", "org.co", "net.co", "gov.co",
    "com.pe", "org.pe",
    "com.cn", "net.cn", "org.cn", "gov.cn", "edu.cn",
    "com.hk", "org.hk", "net.hk", "edu.hk", "gov.hk",
    "com.tw", "org.tw", "net.tw", "edu.tw", "gov.tw",
    "com.sg", "org.sg", "net.sg", "edu.sg", "gov.sg",
    "com.my", "org.my", "net.my", "edu.my", "gov.my",
    "com.tr", "org.tr", "net.tr", "edu.tr", "gov.tr",
    "com.ua", "org.ua", "net.ua",
    "com.ru", "org.ru", "net.ru",
    "com.pl", "net.pl", "org.pl",
    "com.es", "org.es",
    "com.gr", "org.gr",
    "com.pt", "org.pt",
    "com.eg", "org.eg",
    "com.sa", "org.sa",
    "com.ng", "org.ng",
    "com.vn", "net.vn", "org.vn",
    "com.ph", "net.ph", "org.ph",
    "com.pk", "org.pk", "net.pk",
    "edu.in", "gov.in", "net.in", "org.in",
];

/// Brands whose short subdomains are a common phishing pattern.
pub const WELL_KNOWN_DOMAINS: &[&str] = &[
    "google.com", "facebook.com", "instagram.com", "twitter.com", "x.com", "youtube.com",
    "amazon.com", "apple.com", "microsoft.com", "linkedin.com", "paypal.com", "netflix.com",
    "github.com", "tiktok.com", "whatsapp.com", "yahoo.com", "outlook.com", "live.com",
    "dropbox.com", "spotify.com", "reddit.com", "pinterest.com", "ebay.com", "shopify.com",
];

/// Technical subdomains accepted on well-known domains regardless of length.
pub const COMMON_SUBDOMAINS: &[&str] = &[
    "www", "api", "cdn", "app", "m", "mobile", "mail", "docs", "blog", "shop", "store",
    "help", "support", "dev", "static", "img", "ads", "pay", "my", "en", "de", "fr", "es",
];

/// Slugs that collide with the service's own top-level routes. A link with
/// one of these slugs would be shadowed by the route and never redirect.
pub const RESERVED_SLUGS: &[&str] = &["api", "health", "webhooks"];

/// Unicode blocks whose letters are visually confusable with Latin ones.
pub const LOOKALIKE_RANGES: &[(char, char)] = &[
    ('\u{0370}', '\u{03FF}'),   // Greek and Coptic
    ('\u{0400}', '\u{04FF}'),   // Cyrillic
    ('\u{0500}', '\u{052F}'),   // Cyrillic Supplement
    ('\u{1D00}', '\u{1D7F}'),   // Phonetic Extensions (small capitals)
    ('\u{2100}', '\u{214F}'),   // Letterlike Symbols
    ('\u{2160}', '\u{217F}'),   // Roman numerals
    ('\u{FF10}', '\u{FF5A}'),   // Fullwidth digits and Latin letters
    ('\u{1D400}', '\u{1D7FF}'), // Mathematical Alphanumeric Symbols
];

/// Individual code points outside [`LOOKALIKE_RANGES`] that mimic Latin
/// letters or digits.
pub const LOOKALIKE_CHARS: &[char] = &[
    '\u{0131}', // ı dotless i
    '\u{0237}', // ȷ dotless j
    '\u{0251}', // ɑ latin alpha
    '\u{0261}', // ɡ script g
    '\u{0269}', // ɩ latin iota
    '\u{026A}', // ɪ small capital i
    '\u{0299}', // ʙ small capital b
    '\u{01C0}', // ǀ dental click
    '\u{0555}', // Օ armenian capital oh
    '\u{0570}', // հ armenian ho
    '\u{0578}', // ո armenian vo
    '\u{057D}', // ս armenian seh
    '\u{0585}', // օ armenian oh
    '\u{13A0}', // Ꭰ cherokee a
    '\u{13AA}', // Ꭺ cherokee go
    '\u{13B3}', // Ꮃ cherokee la
    '\u{2010}', // ‐ hyphen
    '\u{2011}', // ‑ non-breaking hyphen
    '\u{2012}', // ‒ figure dash
    '\u{2013}', // – en dash
    '\u{2212}', // − minus sign
];

/// Words rejected anywhere inside a slug.
pub const BLOCKED_SUBSTRINGS: &[&str] = &[
    "fuck", "shit", "cunt", "porn", "nazi", "hitler", "pedo", "rapist", "whore", "nigg",
];

/// Words rejected only as a complete hyphen-separated part of a slug, since
/// they occur inside harmless words (`class`, `sussex`).
pub const BLOCKED_WORDS: &[&str] = &[
    "ass", "sex", "xxx", "rape", "slut", "bitch", "dick", "cock", "kill", "die", "kkk",
    "fag", "twat", "wank", "piss", "milf",
];
