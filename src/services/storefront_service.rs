use chrono::NaiveDate;
use sea_orm::EntityTrait;
use uuid::Uuid;

use crate::{
    admin::badges::order_status_badge,
    dto::catalog::{CatalogPage, Confirmation, HomePage, OrderFormContext, Tracking},
    entity::{Orders, orders::Platform},
    error::{AppError, AppResult, FieldErrors},
    media::{ImageUpload, MAX_IMAGE_BYTES, REFERENCE_DIR, SUPPORTED_EXTENSIONS, validate_image},
    models::{Category, Product, PublicOrder, ReferenceImage},
    response::{ApiResponse, Meta},
    routes::params::CatalogQuery,
    services::{
        catalog_service,
        order_service::{self, NewImage, NewOrder, reference_caption},
    },
    state::AppState,
};

pub const MAX_REFERENCE_IMAGES: usize = 3;

/// The only file parts an order form may carry.
pub const REFERENCE_IMAGE_FIELDS: [&str; MAX_REFERENCE_IMAGES] =
    ["reference_image_1", "reference_image_2", "reference_image_3"];

const REQUIRED: &str = "This field is required.";

/// Raw order form as received from the customer.
#[derive(Debug, Default, Clone)]
pub struct OrderSubmission {
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub social_handle: String,
    pub product_id: String,
    pub design_description: String,
    pub required_by: String,
    pub images: Vec<ImageUpload>,
}

/// A submission that passed every check not needing the database.
#[derive(Debug, Clone)]
pub struct ValidSubmission {
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub social_handle: String,
    pub product_id: Option<Uuid>,
    pub design_description: String,
    pub required_by: Option<NaiveDate>,
    /// Uploads paired with the extension they will be stored under.
    pub images: Vec<(ImageUpload, String)>,
}

pub fn is_plausible_email(email: &str) -> bool {
    if email.len() > 254 || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

pub fn check_length(errors: &mut FieldErrors, field: &str, value: &str, max: usize) {
    let length = value.trim().chars().count();
    if length > max {
        errors.add(
            field,
            format!("Ensure this value has at most {max} characters (it has {length})."),
        );
    }
}

/// Mandatory contact and description fields shared by every order form.
pub fn check_contact(errors: &mut FieldErrors, client_name: &str, email: &str, description: &str) {
    if client_name.trim().is_empty() {
        errors.add("client_name", REQUIRED);
    }
    check_length(errors, "client_name", client_name, 200);

    let email = email.trim();
    if email.is_empty() {
        errors.add("email", REQUIRED);
    } else if !is_plausible_email(email) {
        errors.add("email", "Enter a valid email address.");
    }

    if description.trim().is_empty() {
        errors.add("design_description", REQUIRED);
    }
}

/// Checks that need no database access. Nothing is written on failure.
pub fn validate_submission(form: &OrderSubmission) -> Result<ValidSubmission, FieldErrors> {
    let mut errors = FieldErrors::new();

    check_contact(
        &mut errors,
        &form.client_name,
        &form.email,
        &form.design_description,
    );
    check_length(&mut errors, "phone", &form.phone, 20);
    check_length(&mut errors, "social_handle", &form.social_handle, 100);

    let product_id = match form.product_id.trim() {
        "" => None,
        raw => match Uuid::parse_str(raw) {
            Ok(id) => Some(id),
            Err(_) => {
                errors.add("product_id", "Select a valid product.");
                None
            }
        },
    };

    let required_by = match form.required_by.trim() {
        "" => None,
        raw => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                errors.add("required_by", "Enter a valid date (YYYY-MM-DD).");
                None
            }
        },
    };

    if form.images.len() > MAX_REFERENCE_IMAGES {
        errors.add(
            "reference_images",
            format!("At most {MAX_REFERENCE_IMAGES} reference images are accepted."),
        );
    }

    let mut images = Vec::with_capacity(form.images.len());
    for upload in &form.images {
        if !REFERENCE_IMAGE_FIELDS.contains(&upload.field.as_str()) {
            errors.add(&upload.field, "Unexpected file field.");
            continue;
        }
        match validate_image(upload) {
            Ok(ext) => images.push((upload.clone(), ext)),
            Err(message) => errors.add(&upload.field, message),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidSubmission {
        client_name: form.client_name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        social_handle: form.social_handle.trim().to_string(),
        product_id,
        design_description: form.design_description.trim().to_string(),
        required_by,
        images,
    })
}

pub async fn home(state: &AppState) -> AppResult<ApiResponse<HomePage>> {
    let featured = catalog_service::featured_products(&state.orm).await?;
    let categories = catalog_service::list_categories(&state.orm).await?;
    Ok(ApiResponse::success(
        "Home",
        HomePage {
            featured,
            categories,
        },
        Some(Meta::empty()),
    ))
}

pub async fn catalog(state: &AppState, query: CatalogQuery) -> AppResult<ApiResponse<CatalogPage>> {
    let result = catalog_service::search(&state.orm, &query).await?;
    let categories = catalog_service::list_categories(&state.orm).await?;
    let q = query.q.map(|q| q.trim().to_string()).filter(|q| !q.is_empty());

    let data = CatalogPage {
        products: result.products,
        categories,
        current_category: result.category.map(Category::from),
        q,
    };
    Ok(ApiResponse::success("Catalog", data, Some(result.meta)))
}

pub async fn product_detail(state: &AppState, id: &str) -> AppResult<ApiResponse<Product>> {
    let id = Uuid::parse_str(id).map_err(|_| AppError::NotFound)?;
    let product = catalog_service::find_active_product(&state.orm, id).await?;
    let product = match product {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Product", product, Some(Meta::empty())))
}

pub async fn order_form(
    state: &AppState,
    preselect: Option<&str>,
) -> AppResult<ApiResponse<OrderFormContext>> {
    let products = catalog_service::active_products(&state.orm).await?;
    let selected_product = preselect
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
        .and_then(|id| products.iter().find(|p| p.id == id).cloned());

    let data = OrderFormContext {
        products,
        selected_product,
        default_platform: Platform::Website,
        max_reference_images: MAX_REFERENCE_IMAGES,
        max_image_bytes: MAX_IMAGE_BYTES,
        accepted_extensions: SUPPORTED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
    };
    Ok(ApiResponse::success("Order form", data, Some(Meta::empty())))
}

/// Validate, store the images, insert the order and issue a confirmation
/// ticket. Returns the ticket.
pub async fn submit_order(state: &AppState, form: OrderSubmission) -> AppResult<String> {
    let valid = validate_submission(&form).map_err(AppError::Validation)?;

    if let Some(id) = valid.product_id {
        let active = catalog_service::find_active_product(&state.orm, id).await?;
        if active.is_none() {
            let mut errors = FieldErrors::new();
            errors.add("product_id", "Select a valid product.");
            return Err(AppError::Validation(errors));
        }
    }

    let mut stored: Vec<String> = Vec::with_capacity(valid.images.len());
    for (upload, ext) in &valid.images {
        match state.media.save(REFERENCE_DIR, ext, &upload.data).await {
            Ok(path) => stored.push(path),
            Err(err) => {
                state.media.remove_all(&stored).await;
                return Err(err.into());
            }
        }
    }

    let images: Vec<NewImage> = stored
        .iter()
        .enumerate()
        .map(|(index, path)| NewImage {
            path: path.clone(),
            caption: reference_caption(index + 1),
        })
        .collect();

    let new = NewOrder {
        client_name: valid.client_name,
        email: valid.email,
        phone: valid.phone,
        social_handle: valid.social_handle,
        product_id: valid.product_id,
        design_description: valid.design_description,
        required_by: valid.required_by,
        ..NewOrder::default()
    };

    let order = match order_service::create_order(&state.orm, new, &images).await {
        Ok(order) => order,
        Err(err) => {
            state.media.remove_all(&stored).await;
            return Err(err);
        }
    };

    Ok(state.tickets.issue(order.id, order.tracking_token))
}

/// Consume a confirmation ticket. `None` means the caller should be sent
/// back to the home page.
pub async fn confirmation(
    state: &AppState,
    ticket: Option<&str>,
) -> AppResult<Option<ApiResponse<Confirmation>>> {
    let Some(ticket) = ticket.and_then(|raw| state.tickets.take(raw.trim())) else {
        return Ok(None);
    };

    let order = Orders::find_by_id(ticket.order_id).one(&state.orm).await?;
    let Some(order) = order else {
        return Ok(None);
    };

    let images = order_service::load_images(&state.orm, order.id)
        .await?
        .into_iter()
        .map(ReferenceImage::from)
        .collect();
    let tracking_url = state.tracking_url(&order.tracking_token);

    let data = Confirmation {
        order: PublicOrder::from(order),
        images,
        tracking_url,
    };
    Ok(Some(ApiResponse::success(
        "Order received",
        data,
        Some(Meta::empty()),
    )))
}

pub async fn track(state: &AppState, token: &str) -> AppResult<ApiResponse<Tracking>> {
    let order = order_service::find_by_token(&state.orm, token).await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let product_name = order_service::product_name(&state.orm, &order).await?;
    let images = order_service::load_images(&state.orm, order.id)
        .await?
        .into_iter()
        .map(ReferenceImage::from)
        .collect();

    let data = Tracking {
        status_label: order.status.label().to_string(),
        payment_label: order.payment_status.label().to_string(),
        status_badge: order_status_badge(order.status),
        product_name,
        images,
        order: PublicOrder::from(order),
    };
    Ok(ApiResponse::success("Order status", data, Some(Meta::empty())))
}
