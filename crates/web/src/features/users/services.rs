use rust_decimal::Decimal;
use uuid::Uuid;

use storage::dto::cart::ReplaceCartRequest;
use storage::dto::user::CreateUserRequest;
use storage::error::Result;
use storage::models::{CartLine, User};
use storage::repository::carts::CartRepository;
use storage::repository::users::UserRepository;
use storage::services::checkout;

use crate::state::AppState;

/// Register a user
pub fn create_user(state: &AppState, request: &CreateUserRequest) -> Result<User> {
    UserRepository::new(&state.store).insert(User {
        user_id: Uuid::new_v4(),
        name: request.name.clone(),
        email: request.email.clone(),
        created_at: state.clock().now(),
    })
}

/// Get user by id
pub fn get_user(state: &AppState, user_id: Uuid) -> Result<User> {
    UserRepository::new(&state.store).find_by_id(user_id)
}

/// List all users
pub fn list_users(state: &AppState) -> Vec<User> {
    UserRepository::new(&state.store).list()
}

/// Get the user's current cart
pub fn get_cart(state: &AppState, user_id: Uuid) -> Result<Vec<CartLine>> {
    UserRepository::new(&state.store).find_by_id(user_id)?;
    Ok(CartRepository::new(&state.store).get(user_id))
}

/// Replace the user's cart wholesale
pub fn replace_cart(
    state: &AppState,
    user_id: Uuid,
    request: &ReplaceCartRequest,
) -> Result<Vec<CartLine>> {
    UserRepository::new(&state.store).find_by_id(user_id)?;
    let lines: Vec<CartLine> = request
        .lines
        .iter()
        .map(|line| CartLine {
            match_id: line.match_id,
            quantity: line.quantity,
        })
        .collect();
    CartRepository::new(&state.store).set_lines(user_id, lines.clone());
    Ok(lines)
}

/// Total the user has spent over confirmed and finished reservations
pub fn total_spent(state: &AppState, user_id: Uuid) -> Result<Decimal> {
    checkout::total_spent_by_user(&state.store, user_id)
}
