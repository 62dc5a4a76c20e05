use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Ta,
    Bn,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LanguageInfo {
    pub code: Language,
    pub name: &'static str,
    pub native_name: &'static str,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::En, Language::Hi, Language::Ta, Language::Bn];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Ta => "ta",
            Language::Bn => "bn",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim().to_lowercase();
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    /// Unknown or empty codes resolve to English.
    pub fn parse_or_default(code: &str) -> Self {
        Self::parse(code).unwrap_or_default()
    }

    pub fn info(&self) -> LanguageInfo {
        let (name, native_name) = match self {
            Language::En => ("English", "English"),
            Language::Hi => ("Hindi", "हिन्दी"),
            Language::Ta => ("Tamil", "தமிழ்"),
            Language::Bn => ("Bengali", "বাংলা"),
        };
        LanguageInfo {
            code: *self,
            name,
            native_name,
        }
    }

    /// All supported languages are left-to-right.
    pub fn is_rtl(&self) -> bool {
        false
    }

    fn uses_indian_format(&self) -> bool {
        matches!(self, Language::Hi | Language::Ta | Language::Bn)
    }

    fn table(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::En => EN,
            Language::Hi => HI,
            Language::Ta => TA,
            Language::Bn => BN,
        }
    }
}

pub fn available_languages() -> Vec<LanguageInfo> {
    Language::ALL.iter().map(Language::info).collect()
}

fn lookup(language: Language, key: &str) -> Option<&'static str> {
    language
        .table()
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// Translator bound to one language for the duration of a request.
#[derive(Debug, Clone, Copy, Default)]
pub struct I18n {
    language: Language,
}

impl I18n {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Current language, then English, then the key itself.
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        lookup(self.language, key)
            .or_else(|| lookup(Language::En, key))
            .unwrap_or(key)
    }

    /// Every key in the English table, translated.
    pub fn translations(&self) -> Vec<(&'static str, &'static str)> {
        EN.iter().map(|(key, _)| (*key, self.t(*key))).collect()
    }

    /// `₹1,50,000` for Indian languages; `INR 150,000` for English.
    pub fn format_currency(&self, amount: f64, currency: &str) -> String {
        if self.language.uses_indian_format() {
            format!("₹{}", format_number(amount, true))
        } else {
            format!("{} {}", currency, format_number(amount, false))
        }
    }

    /// `January 15, 2024` for English, `15 January 2024` otherwise.
    pub fn format_date(&self, date: NaiveDate) -> String {
        match self.language {
            Language::En => date.format("%B %-d, %Y").to_string(),
            _ => date.format("%-d %B %Y").to_string(),
        }
    }
}

/// Groups the integer part by thousands, or Indian lakh/crore style when
/// `indian` is set. At most two decimals, trailing zeros dropped.
fn format_number(amount: f64, indian: bool) -> String {
    let negative = amount < 0.0;
    let rounded = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let digits: Vec<char> = int_part.chars().collect();
    let mut groups: Vec<String> = Vec::new();
    let mut end = digits.len();
    let mut size = 3;
    while end > 0 {
        let start = end.saturating_sub(size);
        groups.push(digits[start..end].iter().collect());
        end = start;
        if indian {
            size = 2;
        }
    }
    groups.reverse();

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&groups.join(","));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

const EN: &[(&str, &str)] = &[
    ("nav.home", "Home"),
    ("nav.plan", "Plan Trip"),
    ("nav.bookings", "My Bookings"),
    ("nav.profile", "Profile"),
    ("nav.signIn", "Sign In"),
    ("nav.signUp", "Sign Up"),
    ("tripPlanner.title", "Plan Your Perfect Trip"),
    (
        "tripPlanner.subtitle",
        "Tell us about your travel preferences and we'll create a personalized itinerary just for you.",
    ),
    ("itinerary.title", "Your Itinerary"),
    ("booking.title", "Complete Your Booking"),
    ("booking.confirmed", "Booking Confirmed!"),
    ("common.loading", "Loading..."),
    ("common.error", "Error"),
    ("common.success", "Success"),
    ("common.cancel", "Cancel"),
    ("common.next", "Next"),
    ("common.previous", "Previous"),
    ("common.close", "Close"),
    ("common.save", "Save"),
    ("common.share", "Share"),
    ("common.download", "Download"),
    ("common.required", "Required"),
    ("common.optional", "Optional"),
    ("app.name", "AI Trip Planner"),
];

const HI: &[(&str, &str)] = &[
    ("nav.home", "होम"),
    ("nav.plan", "यात्रा योजना"),
    ("nav.bookings", "मेरी बुकिंग"),
    ("nav.profile", "प्रोफ़ाइल"),
    ("nav.signIn", "साइन इन"),
    ("nav.signUp", "साइन अप"),
    ("tripPlanner.title", "अपनी परफेक्ट यात्रा की योजना बनाएं"),
    (
        "tripPlanner.subtitle",
        "हमें अपनी यात्रा की प्राथमिकताएं बताएं और हम आपके लिए एक व्यक्तिगत यात्रा कार्यक्रम बनाएंगे।",
    ),
    ("itinerary.title", "आपका यात्रा कार्यक्रम"),
    ("booking.title", "अपनी बुकिंग पूरी करें"),
    ("booking.confirmed", "बुकिंग पुष्ट!"),
    ("common.loading", "लोड हो रहा है..."),
    ("common.error", "त्रुटि"),
    ("common.success", "सफलता"),
    ("common.cancel", "रद्द करें"),
    ("common.next", "अगला"),
    ("common.previous", "पिछला"),
    ("common.close", "बंद करें"),
    ("common.save", "सहेजें"),
    ("common.share", "साझा करें"),
    ("common.download", "डाउनलोड"),
    ("common.required", "आवश्यक"),
    ("common.optional", "वैकल्पिक"),
];

const TA: &[(&str, &str)] = &[
    ("nav.home", "வீடு"),
    ("nav.plan", "பயணத் திட்டம்"),
    ("nav.bookings", "எனது முன்பதிவுகள்"),
    ("nav.profile", "சுயவிவரம்"),
    ("nav.signIn", "உள்நுழைய"),
    ("nav.signUp", "பதிவு செய்"),
    ("tripPlanner.title", "உங்கள் சரியான பயணத்தை திட்டமிடுங்கள்"),
    (
        "tripPlanner.subtitle",
        "உங்கள் பயண விருப்பங்களை எங்களிடம் கூறுங்கள், நாங்கள் உங்களுக்காக தனிப்பட்ட பயண அட்டவணையை உருவாக்குவோம்.",
    ),
    ("itinerary.title", "உங்கள் பயண அட்டவணை"),
    ("booking.title", "உங்கள் முன்பதிவை முடிக்கவும்"),
    ("booking.confirmed", "முன்பதிவு உறுதிப்படுத்தப்பட்டது!"),
    ("common.loading", "ஏற்றுகிறது..."),
    ("common.error", "பிழை"),
    ("common.success", "வெற்றி"),
    ("common.cancel", "ரத்து செய்"),
    ("common.next", "அடுத்து"),
    ("common.previous", "முந்தைய"),
    ("common.close", "மூடு"),
    ("common.save", "சேமி"),
    ("common.share", "பகிர்"),
    ("common.download", "பதிவிறக்கு"),
    ("common.required", "தேவை"),
    ("common.optional", "விருப்பமானது"),
];

const BN: &[(&str, &str)] = &[
    ("nav.home", "হোম"),
    ("nav.plan", "ভ্রমণ পরিকল্পনা"),
    ("nav.bookings", "আমার বুকিং"),
    ("nav.profile", "প্রোফাইল"),
    ("nav.signIn", "সাইন ইন"),
    ("nav.signUp", "সাইন আপ"),
    ("tripPlanner.title", "আপনার নিখুঁত ভ্রমণ পরিকল্পনা করুন"),
    (
        "tripPlanner.subtitle",
        "আপনার ভ্রমণ পছন্দ সম্পর্কে আমাদের বলুন এবং আমরা আপনার জন্য একটি ব্যক্তিগত ভ্রমণ পরিকল্পনা তৈরি করব।",
    ),
    ("itinerary.title", "আপনার ভ্রমণ পরিকল্পনা"),
    ("booking.title", "আপনার বুকিং সম্পূর্ণ করুন"),
    ("booking.confirmed", "বুকিং নিশ্চিত!"),
    ("common.loading", "লোড হচ্ছে..."),
    ("common.error", "ত্রুটি"),
    ("common.success", "সফলতা"),
    ("common.cancel", "বাতিল"),
    ("common.next", "পরবর্তী"),
    ("common.previous", "পূর্ববর্তী"),
    ("common.close", "বন্ধ"),
    ("common.save", "সংরক্ষণ"),
    ("common.share", "শেয়ার"),
    ("common.download", "ডাউনলোড"),
    ("common.required", "প্রয়োজনীয়"),
    ("common.optional", "ঐচ্ছিক"),
];
