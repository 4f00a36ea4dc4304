//! Shopping List Aggregator behavior against the in-memory repository.

use mise_core::{
    Caller, MemoryRepository, RecipeFields, RecipeStore, StoreError, StructuredIngredient,
};
use std::sync::Arc;
use uuid::Uuid;

fn setup() -> (RecipeStore, Arc<MemoryRepository>) {
    let repo = Arc::new(MemoryRepository::new());
    (RecipeStore::new(repo.clone()), repo)
}

fn recipe(name: &str, ingredients: Vec<StructuredIngredient>) -> RecipeFields {
    RecipeFields {
        name: name.to_string(),
        ingredients,
        instructions: "Cook it.".to_string(),
        prep_time: 15,
        category: "Other".to_string(),
    }
}

#[tokio::test]
async fn test_create_merges_flour() {
    let (store, _) = setup();
    let alice = Caller::authenticated(Uuid::new_v4());
    let a = store
        .create_recipe(
            &alice,
            &recipe("A", vec![StructuredIngredient::new(2.0, "cup", "flour")]),
        )
        .await
        .unwrap();
    let b = store
        .create_recipe(
            &alice,
            &recipe(
                "B",
                vec![StructuredIngredient::new(1.0, "cup", "flour").with_notes("sifted")],
            ),
        )
        .await
        .unwrap();

    let id = store
        .create_shopping_list(&alice, "Baking", &[a, b])
        .await
        .unwrap();
    let list = store.get_shopping_list(&alice, id).await.unwrap();

    assert_eq!(list.name, "Baking");
    assert_eq!(list.recipe_ids, vec![a, b]);
    assert_eq!(
        list.ingredients,
        vec![StructuredIngredient::new(3.0, "cup", "flour").with_notes("sifted")]
    );
    assert_eq!(list.created_at, list.updated_at);
}

#[tokio::test]
async fn test_empty_recipe_ids_rejected() {
    let (store, repo) = setup();
    let alice = Caller::authenticated(Uuid::new_v4());

    assert!(matches!(
        store.create_shopping_list(&alice, "Empty", &[]).await,
        Err(StoreError::Validation(_))
    ));
    assert_eq!(repo.shopping_list_count(), 0);
}

#[tokio::test]
async fn test_foreign_or_missing_recipe_rejected() {
    let (store, repo) = setup();
    let alice = Caller::authenticated(Uuid::new_v4());
    let bob = Caller::authenticated(Uuid::new_v4());
    let mine = store
        .create_recipe(
            &alice,
            &recipe("Mine", vec![StructuredIngredient::new(1.0, "tsp", "salt")]),
        )
        .await
        .unwrap();
    let theirs = store
        .create_recipe(
            &bob,
            &recipe("Theirs", vec![StructuredIngredient::new(1.0, "tsp", "salt")]),
        )
        .await
        .unwrap();

    for ids in [vec![mine, theirs], vec![mine, Uuid::new_v4()]] {
        let err = store
            .create_shopping_list(&alice, "Mixed", &ids)
            .await
            .unwrap_err();
        assert!(
            matches!(err, StoreError::Validation(ref m) if m == "some recipes not found or unauthorized")
        );
    }
    assert_eq!(repo.shopping_list_count(), 0);
}

#[tokio::test]
async fn test_list_is_a_snapshot() {
    let (store, _) = setup();
    let alice = Caller::authenticated(Uuid::new_v4());
    let id = store
        .create_recipe(
            &alice,
            &recipe("Rice", vec![StructuredIngredient::new(2.0, "cup", "rice")]),
        )
        .await
        .unwrap();
    let list_id = store
        .create_shopping_list(&alice, "Dinner", &[id])
        .await
        .unwrap();

    store
        .update_recipe(
            &alice,
            id,
            &recipe("Rice", vec![StructuredIngredient::new(5.0, "cup", "rice")]),
        )
        .await
        .unwrap();
    store.remove_recipe(&alice, id).await.unwrap();

    let list = store.get_shopping_list(&alice, list_id).await.unwrap();
    assert_eq!(list.ingredients[0].quantity, 2.0);
    assert_eq!(list.recipe_ids, vec![id]);
    assert!(store
        .source_recipe_names(&alice, &list)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_blank_name_gets_default() {
    let (store, _) = setup();
    let alice = Caller::authenticated(Uuid::new_v4());
    let id = store
        .create_recipe(
            &alice,
            &recipe("Tea", vec![StructuredIngredient::new(1.0, "bag", "tea")]),
        )
        .await
        .unwrap();

    let list_id = store.create_shopping_list(&alice, "  ", &[id]).await.unwrap();
    let list = store.get_shopping_list(&alice, list_id).await.unwrap();
    assert!(list.name.starts_with("Shopping List - "));
}

#[tokio::test]
async fn test_preview_matches_created_list() {
    let (store, repo) = setup();
    let alice = Caller::authenticated(Uuid::new_v4());
    let a = store
        .create_recipe(
            &alice,
            &recipe(
                "A",
                vec![
                    StructuredIngredient::new(1.0, "whole", "onion").with_notes("diced"),
                    StructuredIngredient::new(2.0, "clove", "garlic"),
                ],
            ),
        )
        .await
        .unwrap();
    let b = store
        .create_recipe(
            &alice,
            &recipe(
                "B",
                vec![StructuredIngredient::new(1.0, "Whole", "Onion").with_notes("sliced")],
            ),
        )
        .await
        .unwrap();

    let preview = store.preview_shopping_list(&alice, &[a, b]).await.unwrap();
    assert_eq!(repo.shopping_list_count(), 0);

    let id = store.create_shopping_list(&alice, "x", &[a, b]).await.unwrap();
    let list = store.get_shopping_list(&alice, id).await.unwrap();
    assert_eq!(list.ingredients, preview);
    assert_eq!(preview[0].quantity, 2.0);
    assert_eq!(preview[0].notes.as_deref(), Some("diced, sliced"));
    assert_eq!(preview[1].ingredient, "garlic");
}

#[tokio::test]
async fn test_delete_and_list_shopping_lists() {
    let (store, _) = setup();
    let alice = Caller::authenticated(Uuid::new_v4());
    let bob = Caller::authenticated(Uuid::new_v4());
    let id = store
        .create_recipe(
            &alice,
            &recipe("Soup", vec![StructuredIngredient::new(1.0, "l", "stock")]),
        )
        .await
        .unwrap();
    let first = store
        .create_shopping_list(&alice, "First", &[id])
        .await
        .unwrap();
    let second = store
        .create_shopping_list(&alice, "Second", &[id, id])
        .await
        .unwrap();

    let lists = store.list_shopping_lists(&alice).await.unwrap();
    assert_eq!(lists.len(), 2);
    assert!(store.list_shopping_lists(&bob).await.unwrap().is_empty());

    // Repeating a recipe counts its ingredients twice
    let doubled = store.get_shopping_list(&alice, second).await.unwrap();
    assert_eq!(doubled.ingredients[0].quantity, 2.0);
    assert_eq!(
        store.source_recipe_names(&alice, &doubled).await.unwrap(),
        vec!["Soup".to_string()]
    );

    assert!(matches!(
        store.delete_shopping_list(&bob, first).await,
        Err(StoreError::NotFoundOrUnauthorized)
    ));
    store.delete_shopping_list(&alice, first).await.unwrap();
    assert!(matches!(
        store.get_shopping_list(&alice, first).await,
        Err(StoreError::NotFoundOrUnauthorized)
    ));
    assert_eq!(store.list_shopping_lists(&alice).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_overflowing_merge_is_not_stored() {
    let (store, repo) = setup();
    let alice = Caller::authenticated(Uuid::new_v4());
    let id = store
        .create_recipe(
            &alice,
            &recipe("Brine", vec![StructuredIngredient::new(1e308, "g", "salt")]),
        )
        .await
        .unwrap();

    assert!(matches!(
        store.create_shopping_list(&alice, "Too much", &[id, id]).await,
        Err(StoreError::Validation(_))
    ));
    assert!(matches!(
        store.preview_shopping_list(&alice, &[id, id]).await,
        Err(StoreError::Validation(_))
    ));
    assert_eq!(repo.shopping_list_count(), 0);

    // A single copy still fits
    store
        .create_shopping_list(&alice, "Enough", &[id])
        .await
        .unwrap();
    assert_eq!(store.list_shopping_lists(&alice).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_source_recipe_names_surface_store_failures() {
    let (store, repo) = setup();
    let alice = Caller::authenticated(Uuid::new_v4());
    let id = store
        .create_recipe(
            &alice,
            &recipe("Toast", vec![StructuredIngredient::new(2.0, "slice", "bread")]),
        )
        .await
        .unwrap();
    let list_id = store
        .create_shopping_list(&alice, "Breakfast", &[id])
        .await
        .unwrap();
    let list = store.get_shopping_list(&alice, list_id).await.unwrap();

    repo.set_failing(true);
    assert!(matches!(
        store.source_recipe_names(&alice, &list).await,
        Err(StoreError::Repository(_))
    ));
}
