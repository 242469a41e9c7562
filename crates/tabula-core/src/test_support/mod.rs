//! Pokedex fixture: schema, model declarations, and an in-memory store.

use crate::{
    Error,
    db::{AttributeSet, Db, ValidateContext},
    model::{AssociationOptions, ModelDef, Schema},
    store::SqliteStore,
};

pub(crate) const POKEDEX_DDL: &str = r#"
CREATE TABLE "pokemons" ("id" INTEGER PRIMARY KEY AUTOINCREMENT, "index" INTEGER, "name" TEXT);
CREATE TABLE "categories" ("id" INTEGER PRIMARY KEY AUTOINCREMENT, "name" TEXT);
CREATE TABLE "pokemon_categories" ("id" INTEGER PRIMARY KEY AUTOINCREMENT, "pokemon_id" INTEGER, "category_id" INTEGER);
CREATE TABLE "abilities" ("id" INTEGER PRIMARY KEY AUTOINCREMENT, "name" TEXT);
CREATE TABLE "pokemon_abilities" ("id" INTEGER PRIMARY KEY AUTOINCREMENT, "pokemon_id" INTEGER, "ability_id" INTEGER);
CREATE TABLE "types" ("id" INTEGER PRIMARY KEY AUTOINCREMENT, "name" TEXT);
CREATE TABLE "pokemon_types" ("id" INTEGER PRIMARY KEY AUTOINCREMENT, "pokemon_id" INTEGER, "type_id" INTEGER);
CREATE TABLE "stats" ("id" INTEGER PRIMARY KEY AUTOINCREMENT, "hp" INTEGER, "attack" INTEGER, "defense" INTEGER, "special_attack" INTEGER, "special_defense" INTEGER, "speed" INTEGER, "pokemon_id" INTEGER);
CREATE TABLE "evolutions" ("id" INTEGER PRIMARY KEY AUTOINCREMENT, "pokemon_id" INTEGER, "pokemon_evolution_id" INTEGER);
"#;

const STAT_COLUMNS: [&str; 6] = [
    "hp",
    "attack",
    "defense",
    "special_attack",
    "special_defense",
    "speed",
];

fn valid_index(cx: &ValidateContext<'_>) -> Result<bool, Error> {
    let positive = cx.get("index")?.as_int().is_some_and(|i| i > 0);

    Ok(positive && cx.is_unique(&["index"])?)
}

fn valid_name(cx: &ValidateContext<'_>) -> Result<bool, Error> {
    let present = cx.get("name")?.as_text().is_some_and(|s| !s.is_empty());

    Ok(present && cx.is_unique(&["name"])?)
}

fn valid_stats(cx: &ValidateContext<'_>) -> Result<bool, Error> {
    for column in STAT_COLUMNS {
        let in_range = cx
            .record()
            .get(column)?
            .as_int()
            .is_some_and(|v| (0..=15).contains(&v));
        if !in_range {
            return Ok(false);
        }
    }

    Ok(true)
}

pub(crate) fn pokedex_schema() -> Schema {
    let none = AssociationOptions::new;

    let models = [
        ModelDef::new("Pokemon")
            .has_one("pokemon_category", none())
            .has_one_through("category", "pokemon_category", none())
            .has_many("pokemon_abilities", none())
            .has_many_through("abilities", "pokemon_abilities", none())
            .has_many("pokemon_types", none())
            .has_many_through("types", "pokemon_types", none())
            .has_one("stats", none().class_name("Stats"))
            .has_many("evolutions", none())
            .validate("valid_index", valid_index)
            .validate("valid_name", valid_name),
        ModelDef::new("Category").validate("valid_name", valid_name),
        ModelDef::new("PokemonCategory")
            .belongs_to("pokemon", none())
            .belongs_to("category", none()),
        ModelDef::new("Ability"),
        ModelDef::new("PokemonAbility")
            .belongs_to("pokemon", none())
            .belongs_to("ability", none()),
        ModelDef::new("Type"),
        ModelDef::new("PokemonType")
            .belongs_to("pokemon", none())
            .belongs_to("type", none()),
        ModelDef::new("Stats")
            .table_name("stats")
            .belongs_to("pokemon", none())
            .validate("valid_stats", valid_stats),
        ModelDef::new("Evolution")
            .belongs_to("pokemon", none())
            .belongs_to("pokemon_evolution", none().class_name("Pokemon")),
    ];

    let mut schema = Schema::new();
    for def in models {
        schema.register(def).expect("fixture models are unique");
    }

    schema
}

pub(crate) fn pokedex_store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().expect("in-memory sqlite");
    store.execute_batch(POKEDEX_DDL).expect("pokedex schema");

    store
}

pub(crate) fn pokedex() -> Db<SqliteStore> {
    Db::new(pokedex_store(), pokedex_schema())
}
