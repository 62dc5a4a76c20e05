use std::collections::BTreeMap;

use actix_web::{web, HttpResponse, Responder};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    services::i18n_service::{available_languages, I18n, Language, LanguageInfo},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct TranslationsQuery {
    pub lang: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FormatQuery {
    pub lang: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Serialize)]
struct FormatResponse {
    language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,
}

#[derive(Serialize)]
struct LanguagesResponse {
    languages: Vec<LanguageInfo>,
    default: Language,
}

#[derive(Serialize)]
struct TranslationsResponse {
    language: Language,
    rtl: bool,
    translations: BTreeMap<&'static str, &'static str>,
}

/*
    /api/languages
*/
pub async fn list(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(LanguagesResponse {
        languages: available_languages(),
        default: state.default_language,
    })
}

fn requested_language(lang: Option<&str>, state: &AppState) -> Language {
    lang.map(Language::parse_or_default)
        .unwrap_or(state.default_language)
}

/*
    /api/translations?lang=
*/
pub async fn translations(
    query: web::Query<TranslationsQuery>,
    state: web::Data<AppState>,
) -> impl Responder {
    let language = requested_language(query.lang.as_deref(), &state);
    let i18n = I18n::new(language);

    HttpResponse::Ok().json(TranslationsResponse {
        language,
        rtl: language.is_rtl(),
        translations: i18n.translations().into_iter().collect(),
    })
}

/*
    /api/format?lang=&amount=&currency=&date=
*/
pub async fn format(
    query: web::Query<FormatQuery>,
    state: web::Data<AppState>,
) -> impl Responder {
    let query = query.into_inner();
    let language = requested_language(query.lang.as_deref(), &state);
    let i18n = I18n::new(language);
    let currency = query.currency.as_deref().unwrap_or("INR");

    HttpResponse::Ok().json(FormatResponse {
        language,
        amount: query.amount.map(|amount| i18n.format_currency(amount, currency)),
        date: query.date.map(|date| i18n.format_date(date)),
    })
}
