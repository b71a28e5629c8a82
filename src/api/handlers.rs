use crate::error::PlannerError;
use crate::models::{InventoryItem, MealPlan, PackageSize, RecipeMatch, ShoppingList};
use crate::service::{PlannerService, UnlockReport};
use axum::{
    extract::{Json, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 统一响应体
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

fn ok<T: Serialize>(message: impl Into<String>, data: T) -> Response {
    let response = ApiResponse {
        success: true,
        message: message.into(),
        data: Some(data),
    };
    (StatusCode::OK, Json(response)).into_response()
}

fn bad_request(e: PlannerError) -> Response {
    tracing::warn!("Rejected request: {}", e);
    let response: ApiResponse<()> = ApiResponse {
        success: false,
        message: format!("Error: {}", e),
        data: None,
    };
    (StatusCode::BAD_REQUEST, Json(response)).into_response()
}

fn text(content_type: &'static str, body: String) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body).into_response()
}

/// 请求体: 库存快照
#[derive(Debug, Deserialize)]
pub struct InventoryRequest {
    pub items: Vec<InventoryItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VocabularyResponse {
    pub keywords: Vec<String>,
    pub query_terms: Vec<String>,
    pub staples: Vec<InventoryItem>,
}

#[derive(Debug, Deserialize)]
pub struct DepletionRequest {
    pub items: Vec<InventoryItem>,
    pub horizon_days: Option<i64>,
    pub now: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct DeductionRequest {
    pub name: String,
    pub package_size: Option<PackageSize>,
    /// 原始规格文本，如 "2 x 12 oz"，package_size 缺省时解析
    pub noted_quantity: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeductionResponse {
    pub name: String,
    pub package_size: Option<PackageSize>,
    pub amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct UsageRequest {
    pub items: Vec<InventoryItem>,
    pub ingredient_names: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UnlockRequest {
    pub items: Vec<InventoryItem>,
    pub recipes: Vec<RecipeMatch>,
}

#[derive(Debug, Deserialize)]
pub struct ShoppingListRequest {
    pub items: Vec<InventoryItem>,
    #[serde(default)]
    pub recipes: Vec<RecipeMatch>,
    pub weekly_budget: Option<BigDecimal>,
    pub now: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct MealPlanRequest {
    pub recipes: Vec<RecipeMatch>,
    pub dinners: Option<usize>,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 食材词表 + 常备品
pub async fn vocabulary(
    State(service): State<Arc<PlannerService>>,
    Json(req): Json<InventoryRequest>,
) -> Response {
    let vocab = service.vocabulary(&req.items);
    let response = VocabularyResponse {
        keywords: vocab.iter().map(str::to_string).collect(),
        query_terms: service.recipe_query_terms(&req.items),
        staples: service.staples(&req.items),
    };
    ok(format!("{} keywords", vocab.len()), response)
}

/// 缺货/临期筛选
pub async fn depletion(
    State(service): State<Arc<PlannerService>>,
    Json(req): Json<DepletionRequest>,
) -> Response {
    if let Some(horizon) = req.horizon_days {
        if let Err(e) = PlannerService::validate_horizon(horizon) {
            return bad_request(e);
        }
    }
    let now = req.now.unwrap_or_else(Utc::now);
    let flagged = service.low_or_expiring(&req.items, now, req.horizon_days);
    ok(format!("{} items low or expiring", flagged.len()), flagged)
}

/// 单次使用扣减估算
pub async fn deduction(
    State(service): State<Arc<PlannerService>>,
    Json(req): Json<DeductionRequest>,
) -> Response {
    let package_size = req
        .package_size
        .or_else(|| req.noted_quantity.as_deref().and_then(PackageSize::parse));
    if let Some(size) = &package_size {
        if !size.value.is_finite() || size.value < 0.0 {
            return bad_request(PlannerError::InvalidPackageSize {
                id: req.name.clone(),
                value: size.value,
            });
        }
    }
    let amount = service.estimate_deduction(
        &req.name,
        package_size.as_ref().map(|s| s.value),
        req.quantity,
    );
    let response = DeductionResponse {
        name: req.name,
        package_size,
        amount,
    };
    ok("Deduction estimated", response)
}

/// 记录一次烹饪，返回扣减后的库存
pub async fn usage(
    State(service): State<Arc<PlannerService>>,
    Json(req): Json<UsageRequest>,
) -> Response {
    if let Err(e) = PlannerService::validate_items(&req.items) {
        return bad_request(e);
    }
    let updated = service.record_usage(&req.items, &req.ingredient_names);
    ok(format!("Recorded use of {} ingredients", req.ingredient_names.len()), updated)
}

/// 单项/组合解锁分析
pub async fn unlocks(
    State(service): State<Arc<PlannerService>>,
    Json(req): Json<UnlockRequest>,
) -> Response {
    let report: UnlockReport = service.unlocks(&req.items, &req.recipes);
    ok(
        format!("{} single / {} pair unlocks", report.singles.len(), report.pairs.len()),
        report,
    )
}

fn plan_shopping_list(
    service: &PlannerService,
    req: &ShoppingListRequest,
) -> Result<ShoppingList, PlannerError> {
    PlannerService::validate_items(&req.items)?;
    let now = req.now.unwrap_or_else(Utc::now);
    Ok(service.shopping_list(&req.items, &req.recipes, now, req.weekly_budget.as_ref()))
}

/// 预算内购物清单
pub async fn shopping_list(
    State(service): State<Arc<PlannerService>>,
    Json(req): Json<ShoppingListRequest>,
) -> Response {
    match plan_shopping_list(&service, &req) {
        Ok(list) => ok(
            format!("{} items, total {} / budget {}", list.items.len(), list.total, list.budget),
            list,
        ),
        Err(e) => bad_request(e),
    }
}

/// 购物清单纯文本
pub async fn shopping_list_share(
    State(service): State<Arc<PlannerService>>,
    Json(req): Json<ShoppingListRequest>,
) -> Response {
    match plan_shopping_list(&service, &req) {
        Ok(list) => text("text/plain; charset=utf-8", list.share_text()),
        Err(e) => bad_request(e),
    }
}

/// 购物清单 CSV
pub async fn shopping_list_csv(
    State(service): State<Arc<PlannerService>>,
    Json(req): Json<ShoppingListRequest>,
) -> Response {
    let list = match plan_shopping_list(&service, &req) {
        Ok(list) => list,
        Err(e) => return bad_request(e),
    };
    match list.to_csv() {
        Ok(body) => text("text/csv; charset=utf-8", body),
        Err(e) => {
            tracing::error!("CSV export failed: {}", e);
            let response: ApiResponse<()> = ApiResponse {
                success: false,
                message: format!("Error: {}", e),
                data: None,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}

/// 一周晚餐计划
pub async fn meal_plan(
    State(service): State<Arc<PlannerService>>,
    Json(req): Json<MealPlanRequest>,
) -> Response {
    let plan: MealPlan = service.meal_plan(&req.recipes, req.dinners);
    ok(format!("{} dinners planned", plan.recipes.len()), plan)
}
