use super::value_objects::UserId;

/// Identity a request runs under.
///
/// Passed explicitly into every shopping use case. An anonymous session is
/// valid to construct; operations that need an owner reject it before
/// touching any repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user_id: Option<UserId>,
}

impl Session {
    pub fn authenticated(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expose_user_when_authenticated() {
        let session = Session::authenticated("firebase-uid-123");

        assert!(session.is_authenticated());
        assert_eq!(session.user_id().unwrap().as_str(), "firebase-uid-123");
    }

    #[test]
    fn should_have_no_user_when_anonymous() {
        let session = Session::anonymous();

        assert!(!session.is_authenticated());
        assert!(session.user_id().is_none());
    }

    #[test]
    fn should_default_to_anonymous() {
        assert_eq!(Session::default(), Session::anonymous());
    }
}
