#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;

use routegen_cli::run_cli;
use tempfile::TempDir;

const PETSTORE: &str = r##"{
  "openapi": "3.0.3",
  "info": { "title": "Pet Store", "version": "1.0.0" },
  "paths": {
    "/pets": {
      "get": {
        "summary": "List pets",
        "parameters": [
          { "name": "limit", "in": "query", "schema": { "type": "integer" } }
        ],
        "responses": {
          "200": {
            "description": "ok",
            "content": {
              "application/json": {
                "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Pet" } }
              }
            }
          }
        }
      },
      "post": {
        "requestBody": {
          "content": {
            "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } }
          }
        },
        "responses": {
          "201": {
            "description": "created",
            "content": {
              "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } }
            }
          }
        }
      }
    },
    "/pets/{petId}": {
      "delete": {
        "parameters": [
          { "name": "petId", "in": "path", "required": true, "schema": { "type": "string" } }
        ],
        "responses": { "204": { "description": "gone" } }
      }
    }
  },
  "components": {
    "schemas": {
      "Pet": {
        "type": "object",
        "required": ["id", "name"],
        "properties": {
          "id": { "type": "integer" },
          "name": { "type": "string" }
        }
      }
    }
  }
}
"##;

fn setup() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("openapi.json"), PETSTORE).unwrap();
    dir
}

fn cli(dir: &Path, command: &str, extra: &[&str]) -> i32 {
    let mut args = vec![
        "routegen".to_string(),
        command.to_string(),
        dir.join("openapi.json").display().to_string(),
        "--out".to_string(),
        dir.join("api").display().to_string(),
    ];
    args.extend(extra.iter().map(|s| (*s).to_string()));
    run_cli(args)
}

#[test]
fn test_generate_writes_every_module() {
    let dir = setup();
    assert_eq!(cli(dir.path(), "generate", &[]), 0);

    let out = dir.path().join("api");
    for file in [
        "client.ts",
        "rpc.ts",
        "swr.ts",
        "tanstack-query.ts",
        "vue-query.ts",
        "schemas.ts",
    ] {
        assert!(out.join(file).is_file(), "{file} was not written");
    }

    let rpc = fs::read_to_string(out.join("rpc.ts")).unwrap();
    assert!(rpc.starts_with("// Code generated by routegen. DO NOT EDIT.\n"));
    assert!(rpc.contains("export async function getPets(query: { limit?: number }"));
    assert!(rpc.contains("return client.pets[\":petId\"].$delete({ param }, options);"));

    let schemas = fs::read_to_string(out.join("schemas.ts")).unwrap();
    assert!(schemas.contains("Pet"));

    let client = fs::read_to_string(out.join("client.ts")).unwrap();
    assert!(client.contains(" * Pet Store\n"));
}

#[test]
fn test_target_flag_limits_output() {
    let dir = setup();
    assert_eq!(
        cli(dir.path(), "generate", &["--target", "rpc", "--target", "client"]),
        0
    );
    let out = dir.path().join("api");
    assert!(out.join("rpc.ts").is_file());
    assert!(out.join("client.ts").is_file());
    assert!(!out.join("swr.ts").exists());
}

#[test]
fn test_unknown_target_is_a_usage_error() {
    let dir = setup();
    assert_eq!(cli(dir.path(), "generate", &["--target", "react"]), 2);
}

#[test]
fn test_check_passes_after_generate() {
    let dir = setup();
    assert_eq!(cli(dir.path(), "generate", &[]), 0);
    assert_eq!(cli(dir.path(), "check", &[]), 0);
}

#[test]
fn test_check_detects_stale_and_missing_files() {
    let dir = setup();
    assert_eq!(cli(dir.path(), "check", &[]), 1);

    assert_eq!(cli(dir.path(), "generate", &[]), 0);
    let rpc = dir.path().join("api").join("rpc.ts");
    let edited = fs::read_to_string(&rpc).unwrap().replace("getPets", "listPets");
    fs::write(&rpc, edited).unwrap();
    assert_eq!(cli(dir.path(), "check", &[]), 1);
}

#[test]
fn test_config_file_is_applied() {
    let dir = setup();
    let config = dir.path().join("routegen.toml");
    fs::write(
        &config,
        "targets = [\"client\"]\n\n[client]\nbase_url = \"http://localhost:8787\"\n\n[output]\nschemas = false\n",
    )
    .unwrap();

    let config_arg = config.display().to_string();
    assert_eq!(cli(dir.path(), "generate", &["--config", &config_arg]), 0);

    let out = dir.path().join("api");
    let client = fs::read_to_string(out.join("client.ts")).unwrap();
    assert!(client.contains("hc<AppType>(\"http://localhost:8787\")"));
    assert!(!out.join("schemas.ts").exists());
    assert!(!out.join("rpc.ts").exists());
}

#[test]
fn test_invalid_document_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("openapi.json"), "{ \"openapi\": ").unwrap();
    assert_eq!(cli(dir.path(), "generate", &[]), 1);
    assert!(!dir.path().join("api").exists());
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(cli(dir.path(), "generate", &[]), 1);
}
