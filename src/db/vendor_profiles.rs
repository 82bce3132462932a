use sqlx::PgPool;
use uuid::Uuid;

use crate::models::VendorProfile;

pub struct NewVendorProfile<'a> {
    pub business_name: &'a str,
    pub business_category: &'a str,
    pub license_number: Option<&'a str>,
    pub service_types: &'a [String],
    pub description: Option<&'a str>,
    pub logo_url: Option<&'a str>,
    pub phone_number: &'a str,
    pub country: &'a str,
    pub state: Option<&'a str>,
    pub city: &'a str,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub facebook_url: Option<&'a str>,
    pub instagram_url: Option<&'a str>,
}

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    account_id: Uuid,
    profile: &NewVendorProfile<'_>,
) -> Result<VendorProfile, sqlx::Error> {
    sqlx::query_as::<_, VendorProfile>(
        "INSERT INTO vendor_profiles
            (account_id, business_name, business_category, license_number, service_types,
             description, logo_url, phone_number, country, state, city, latitude, longitude,
             facebook_url, instagram_url)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
         RETURNING *",
    )
    .bind(account_id)
    .bind(profile.business_name)
    .bind(profile.business_category)
    .bind(profile.license_number)
    .bind(profile.service_types)
    .bind(profile.description)
    .bind(profile.logo_url)
    .bind(profile.phone_number)
    .bind(profile.country)
    .bind(profile.state)
    .bind(profile.city)
    .bind(profile.latitude)
    .bind(profile.longitude)
    .bind(profile.facebook_url)
    .bind(profile.instagram_url)
    .fetch_one(executor)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<VendorProfile>, sqlx::Error> {
    sqlx::query_as::<_, VendorProfile>("SELECT * FROM vendor_profiles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_account(
    pool: &PgPool,
    account_id: Uuid,
) -> Result<Option<VendorProfile>, sqlx::Error> {
    sqlx::query_as::<_, VendorProfile>("SELECT * FROM vendor_profiles WHERE account_id = $1")
        .bind(account_id)
        .fetch_optional(pool)
        .await
}

pub async fn list(
    pool: &PgPool,
    category: Option<&str>,
    city: Option<&str>,
) -> Result<Vec<VendorProfile>, sqlx::Error> {
    sqlx::query_as::<_, VendorProfile>(
        "SELECT * FROM vendor_profiles
         WHERE ($1::text IS NULL OR business_category = $1)
           AND ($2::text IS NULL OR city = $2)
         ORDER BY created_at DESC",
    )
    .bind(category)
    .bind(city)
    .fetch_all(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    account_id: Uuid,
    profile: &NewVendorProfile<'_>,
) -> Result<VendorProfile, sqlx::Error> {
    sqlx::query_as::<_, VendorProfile>(
        "UPDATE vendor_profiles SET
            business_name = $2, business_category = $3, license_number = $4,
            service_types = $5, description = $6, logo_url = $7, phone_number = $8,
            country = $9, state = $10, city = $11, latitude = $12, longitude = $13,
            facebook_url = $14, instagram_url = $15, updated_at = now()
         WHERE account_id = $1 RETURNING *",
    )
    .bind(account_id)
    .bind(profile.business_name)
    .bind(profile.business_category)
    .bind(profile.license_number)
    .bind(profile.service_types)
    .bind(profile.description)
    .bind(profile.logo_url)
    .bind(profile.phone_number)
    .bind(profile.country)
    .bind(profile.state)
    .bind(profile.city)
    .bind(profile.latitude)
    .bind(profile.longitude)
    .bind(profile.facebook_url)
    .bind(profile.instagram_url)
    .fetch_one(pool)
    .await
}
