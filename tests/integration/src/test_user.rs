//! User API integration tests.

#[cfg(test)]
mod tests {
    use rustlatch_model::{ApplicationInfo, TwoFactorPolicy};

    use crate::{test_resource_name, user_client};

    #[tokio::test]
    #[ignore = "requires Latch user credentials"]
    async fn test_should_read_subscription() {
        let client = user_client();

        let subscription = client.subscription().await.unwrap();

        assert!(!subscription.subscription().id.is_empty());
    }

    #[tokio::test]
    #[ignore = "requires Latch user credentials"]
    async fn test_should_manage_application_lifecycle() {
        let client = user_client();
        let mut info = ApplicationInfo {
            name: test_resource_name("app"),
            contact_email: "rustlatch@example.com".to_owned(),
            contact_phone: String::new(),
            two_factor: TwoFactorPolicy::Disabled,
            lock_on_request: TwoFactorPolicy::Disabled,
        };

        let added = client.add_application(&info).await.unwrap();
        let app_id = added.application_id().to_owned();
        assert!(!added.secret().is_empty());

        info.name.push_str("-renamed");
        client.update_application(&app_id, &info).await.unwrap();

        let apps = client.show_applications().await.unwrap();
        assert_eq!(
            apps.applications().get(&app_id).map(|a| a.name.as_str()),
            Some(info.name.as_str())
        );

        client.delete_application(&app_id).await.unwrap();
    }
}
