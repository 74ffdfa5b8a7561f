use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::balance::compute_summary;
use crate::couples::Roster;
use crate::drafts::merge_drafts;
use crate::error::Result;
use crate::exchange::compute_settlements;
use crate::schemas::{
    BillSummary, Expense, ExpenseDraft, PersonId, PersonRecord, SettlementStep,
};
use crate::share::clipboard_text;

#[derive(Deserialize, Serialize)]
pub struct BillJson {
    pub people: Vec<PersonRecord>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementJson {
    pub summary: BillSummary,
    pub steps: Vec<SettlementStep>,
    pub share_text: String,
}

#[derive(Deserialize, Serialize)]
pub struct DraftsJson {
    pub people: Vec<PersonRecord>,
    pub drafts: Vec<ExpenseDraft>,
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEditJson {
    pub people: Vec<PersonRecord>,
    pub person_id: PersonId,
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkJson {
    pub people: Vec<PersonRecord>,
    pub person_id: PersonId,
    pub partner_id: PersonId,
}

#[derive(Deserialize, Serialize)]
pub struct HealthJson {
    pub status: String,
    pub version: String,
}

#[get("/health")]
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthJson {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[post("/bills/summary")]
async fn bill_summary(json: web::Json<BillJson>) -> Result<HttpResponse> {
    let bill = json.into_inner();
    let roster = Roster::from_records(bill.people)?;
    Ok(HttpResponse::Ok().json(compute_summary(roster.people(), &bill.expenses)))
}

#[post("/bills/settlement")]
async fn bill_settlement(json: web::Json<BillJson>) -> Result<HttpResponse> {
    let bill = json.into_inner();
    let roster = Roster::from_records(bill.people)?;
    let summary = compute_summary(roster.people(), &bill.expenses);
    let steps = compute_settlements(&summary, &roster);
    info!(
        people = roster.people().len(),
        expenses = bill.expenses.len(),
        steps = steps.len(),
        "computed settlement"
    );
    Ok(HttpResponse::Ok().json(SettlementJson {
        share_text: clipboard_text(&steps, None),
        summary,
        steps,
    }))
}

#[post("/bills/drafts")]
async fn bill_drafts(json: web::Json<DraftsJson>) -> Result<HttpResponse> {
    let DraftsJson { people, drafts } = json.into_inner();
    let roster = Roster::from_records(people)?;
    Ok(HttpResponse::Ok().json(merge_drafts(drafts, roster.people())))
}

#[post("/roster/link")]
async fn roster_link(json: web::Json<LinkJson>) -> Result<HttpResponse> {
    let edit = json.into_inner();
    let mut roster = Roster::from_records(edit.people)?;
    roster.link(&edit.person_id, &edit.partner_id)?;
    Ok(HttpResponse::Ok().json(roster.to_records()))
}

#[post("/roster/unlink")]
async fn roster_unlink(json: web::Json<RosterEditJson>) -> Result<HttpResponse> {
    let edit = json.into_inner();
    let mut roster = Roster::from_records(edit.people)?;
    roster.unlink(&edit.person_id);
    Ok(HttpResponse::Ok().json(roster.to_records()))
}

#[post("/roster/remove")]
async fn roster_remove(json: web::Json<RosterEditJson>) -> Result<HttpResponse> {
    let edit = json.into_inner();
    let mut roster = Roster::from_records(edit.people)?;
    roster.remove_person(&edit.person_id);
    Ok(HttpResponse::Ok().json(roster.to_records()))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(bill_summary)
        .service(bill_settlement)
        .service(bill_drafts)
        .service(roster_link)
        .service(roster_unlink)
        .service(roster_remove);
}
