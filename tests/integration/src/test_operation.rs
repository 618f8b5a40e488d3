//! Operation management integration tests.

#[cfg(test)]
mod tests {
    use rustlatch_model::TwoFactorPolicy;

    use crate::{app_client, test_resource_name};

    #[tokio::test]
    #[ignore = "requires Latch credentials"]
    async fn test_should_add_update_show_and_delete_operation() {
        let client = app_client();
        let app_id = client.credential().id().to_owned();
        let name = test_resource_name("op");

        let added = client
            .add_operation(
                &app_id,
                &name,
                TwoFactorPolicy::Disabled,
                TwoFactorPolicy::Disabled,
            )
            .await
            .unwrap();
        let op_id = added.operation_id().to_owned();
        assert!(!op_id.is_empty());

        let renamed = format!("{name}-renamed");
        client
            .update_operation(&op_id, &renamed, Some(TwoFactorPolicy::OptIn), None)
            .await
            .unwrap();

        let shown = client.show_operation(Some(&op_id)).await.unwrap();
        let (_, operation) = shown.operation().expect("operation should be listed");
        assert_eq!(operation.name, renamed);
        assert_eq!(operation.two_factor, Some(TwoFactorPolicy::OptIn));

        client.delete_operation(&op_id).await.unwrap();

        let all = client.show_operation(None).await.unwrap();
        assert!(!all.operations().contains_key(&op_id));
    }
}
