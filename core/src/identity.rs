//! Who is using the board.
//!
//! There is no real authentication. Hosts pick an [`IdentityProvider`];
//! [`DemoIdentity`] signs everybody in as the same demo student.

/// Address recorded as the contact when nobody is signed in.
pub const FALLBACK_CONTACT: &str = "user@umt.edu";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

/// Resolves the user of the current session, if any.
pub trait IdentityProvider {
    fn current_user(&self) -> Option<User>;
}

/// Always signed in as John Doe.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoIdentity;

impl IdentityProvider for DemoIdentity {
    fn current_user(&self) -> Option<User> {
        Some(User {
            id: 1,
            name: "John Doe".to_string(),
            email: "john.doe@umt.edu".to_string(),
            avatar: Some(
                "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop&crop=face"
                    .to_string(),
            ),
        })
    }
}

/// Nobody is signed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl IdentityProvider for Anonymous {
    fn current_user(&self) -> Option<User> {
        None
    }
}

/// A fixed user, for hosts that already know who is at the keyboard.
#[derive(Debug, Clone)]
pub struct StaticIdentity(pub User);

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<User> {
        Some(self.0.clone())
    }
}
