use mockall::automock;
use uuid::Uuid;

#[automock]
pub trait UuidService {
    /// `usage` names what the id is for, like `booking-id` or `booking-version`.
    fn new_uuid(&self, usage: &str) -> Uuid;
}
