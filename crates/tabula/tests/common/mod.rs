#![allow(dead_code)]

use tabula::prelude::*;

pub const POKEDEX_DDL: &str = r#"
CREATE TABLE "pokemons" ("id" INTEGER PRIMARY KEY AUTOINCREMENT, "index" INTEGER, "name" TEXT);
CREATE TABLE "categories" ("id" INTEGER PRIMARY KEY AUTOINCREMENT, "name" TEXT);
CREATE TABLE "pokemon_categories" ("id" INTEGER PRIMARY KEY AUTOINCREMENT, "pokemon_id" INTEGER, "category_id" INTEGER);
CREATE TABLE "abilities" ("id" INTEGER PRIMARY KEY AUTOINCREMENT, "name" TEXT);
CREATE TABLE "pokemon_abilities" ("id" INTEGER PRIMARY KEY AUTOINCREMENT, "pokemon_id" INTEGER, "ability_id" INTEGER);
CREATE TABLE "types" ("id" INTEGER PRIMARY KEY AUTOINCREMENT, "name" TEXT);
CREATE TABLE "pokemon_types" ("id" INTEGER PRIMARY KEY AUTOINCREMENT, "pokemon_id" INTEGER, "type_id" INTEGER);
CREATE TABLE "evolutions" ("id" INTEGER PRIMARY KEY AUTOINCREMENT, "pokemon_id" INTEGER, "pokemon_evolution_id" INTEGER);
"#;

fn valid_index(cx: &ValidateContext<'_>) -> Result<bool, Error> {
    let positive = cx.get("index")?.as_int().is_some_and(|i| i > 0);

    Ok(positive && cx.is_unique(&["index"])?)
}

fn valid_name(cx: &ValidateContext<'_>) -> Result<bool, Error> {
    let present = cx.get("name")?.as_text().is_some_and(|s| !s.is_empty());

    Ok(present && cx.is_unique(&["name"])?)
}

pub fn schema() -> Schema {
    let none = AssociationOptions::new;

    Schema::new()
        .with(
            ModelDef::new("Pokemon")
                .has_one("pokemon_category", none())
                .has_one_through("category", "pokemon_category", none())
                .has_many("pokemon_abilities", none())
                .has_many_through("abilities", "pokemon_abilities", none())
                .has_many("pokemon_types", none())
                .has_many_through("types", "pokemon_types", none())
                .has_many("evolutions", none())
                .validate("valid_index", valid_index)
                .validate("valid_name", valid_name),
        )
        .and_then(|s| s.with(ModelDef::new("Category").validate("valid_name", valid_name)))
        .and_then(|s| {
            s.with(
                ModelDef::new("PokemonCategory")
                    .belongs_to("pokemon", none())
                    .belongs_to("category", none()),
            )
        })
        .and_then(|s| s.with(ModelDef::new("Ability")))
        .and_then(|s| {
            s.with(
                ModelDef::new("PokemonAbility")
                    .belongs_to("pokemon", none())
                    .belongs_to("ability", none()),
            )
        })
        .and_then(|s| s.with(ModelDef::new("Type")))
        .and_then(|s| {
            s.with(
                ModelDef::new("PokemonType")
                    .belongs_to("pokemon", none())
                    .belongs_to("type", none()),
            )
        })
        .and_then(|s| {
            s.with(
                ModelDef::new("Evolution")
                    .belongs_to("pokemon", none())
                    .belongs_to("pokemon_evolution", none().class_name("Pokemon")),
            )
        })
        .expect("pokedex models are unique")
}

pub fn pokedex() -> Db<SqliteStore> {
    let store = SqliteStore::open_in_memory().expect("in-memory sqlite");
    store.execute_batch(POKEDEX_DDL).expect("pokedex schema");

    Db::new(store, schema())
}
