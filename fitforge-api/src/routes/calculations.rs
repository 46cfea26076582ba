use actix_web::{get, post, web, HttpResponse};
use itertools::Itertools;

use fitforge_db::profile::ProfileRepository;
use fitforge_model::energy::{
    body_mass_index, energy_profile, AnthropometricInput, BmiCategory,
};

use crate::{
    auth::AuthUser,
    error::ApiError,
    models::{BmiQuery, BmiResponse, TdeeRequest},
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(tdee).service(bmi).service(tdee_from_profile);
}

/// Open to unauthenticated callers; the body carries everything needed.
#[post("/calculations/tdee")]
async fn tdee(body: web::Json<TdeeRequest>) -> Result<HttpResponse, ApiError> {
    let input = body.input();
    input
        .validate()
        .map_err(|violations| ApiError::Validation(violations.join("; ")))?;

    let profile = energy_profile(&input, body.activity_level);
    Ok(HttpResponse::Ok().json(profile))
}

#[get("/calculations/bmi")]
async fn bmi(query: web::Query<BmiQuery>) -> Result<HttpResponse, ApiError> {
    if query.weight_kg <= 0.0 || query.height_cm <= 0.0 {
        return Err(ApiError::BadRequest(
            "Weight and height must be positive numbers".to_owned(),
        ));
    }

    let bmi = body_mass_index(query.weight_kg, query.height_cm);
    Ok(HttpResponse::Ok().json(BmiResponse {
        bmi,
        category: BmiCategory::from_bmi(bmi),
        weight_kg: query.weight_kg,
        height_cm: query.height_cm,
    }))
}

/// Same calculation, but the inputs come from the stored profile. The
/// profile is allowed to be partial in general, so each required field is
/// checked here and all gaps reported in one message.
#[post("/calculations/tdee/from-profile")]
async fn tdee_from_profile(
    user: AuthUser,
    profiles: web::Data<dyn ProfileRepository>,
) -> Result<HttpResponse, ApiError> {
    let stored = profiles
        .find(&user.0.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found. Please create a profile first.".to_owned()))?;

    let (Some(age), Some(sex), Some(height_cm), Some(weight_kg), Some(activity_level)) = (
        stored.age,
        stored.sex,
        stored.height_cm,
        stored.current_weight_kg,
        stored.activity_level,
    ) else {
        let required = [
            ("age", stored.age.is_none()),
            ("sex", stored.sex.is_none()),
            ("height_cm", stored.height_cm.is_none()),
            ("current_weight_kg", stored.current_weight_kg.is_none()),
            ("activity_level", stored.activity_level.is_none()),
        ];
        let missing = required
            .into_iter()
            .filter(|(_, absent)| *absent)
            .map(|(field, _)| field)
            .join(", ");
        return Err(ApiError::BadRequest(format!(
            "Profile is incomplete. Missing fields: {missing}"
        )));
    };

    let input = AnthropometricInput {
        weight_kg,
        height_cm,
        age,
        sex,
    };
    let profile = energy_profile(&input, activity_level);

    Ok(HttpResponse::Ok().json(profile))
}
