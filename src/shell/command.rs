//! Interactive console commands

use std::str::FromStr;

use crate::models::Id;

pub const HELP: &str = "\
Comandos:
  go <ruta>               navegar (/, /usuarios, /eventos, /categorias, /inscripciones)
  search [texto]          buscar; sin texto limpia la búsqueda
  filter <nombre> [valor] filtrar; sin valor limpia el filtro
  add                     abrir el formulario de alta
  edit <id>               abrir el formulario de edición
  set <campo> <valor>     completar un campo del formulario
  save                    guardar el formulario (o iniciar sesión en /login)
  cancel                  cerrar el formulario
  delete <id>             eliminar un registro
  login <email> <clave>   iniciar sesión
  logout                  cerrar sesión
  show                    volver a mostrar la pantalla
  help                    esta ayuda
  quit                    salir";

/// One line typed at the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(String),
    Search(String),
    Filter { name: String, value: String },
    Add,
    Edit(Id),
    Set { name: String, value: String },
    Save,
    Cancel,
    Delete(Id),
    Login { email: String, password: String },
    Logout,
    Show,
    Help,
    Quit,
}

fn parse_id(arg: &str) -> Result<Id, String> {
    arg.trim()
        .parse()
        .map_err(|_| format!("Identificador inválido: '{}'", arg.trim()))
}

/// Split off the first word; the remainder keeps inner spaces
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (word, rest) = split_word(line);

        let command = match word.to_lowercase().as_str() {
            "go" | "cd" => {
                if rest.is_empty() {
                    return Err("Uso: go <ruta>".to_string());
                }
                Command::Go(rest.to_string())
            }
            "search" | "buscar" => Command::Search(rest.to_string()),
            "filter" | "filtrar" => {
                let (name, value) = split_word(rest);
                if name.is_empty() {
                    return Err("Uso: filter <nombre> [valor]".to_string());
                }
                Command::Filter {
                    name: name.to_string(),
                    value: value.to_string(),
                }
            }
            "add" | "agregar" => Command::Add,
            "edit" | "editar" => Command::Edit(parse_id(rest)?),
            "set" => {
                let (name, value) = split_word(rest);
                if name.is_empty() {
                    return Err("Uso: set <campo> <valor>".to_string());
                }
                Command::Set {
                    name: name.to_string(),
                    value: value.to_string(),
                }
            }
            "save" | "guardar" => Command::Save,
            "cancel" | "cancelar" => Command::Cancel,
            "delete" | "eliminar" => Command::Delete(parse_id(rest)?),
            "login" => {
                let (email, password) = split_word(rest);
                Command::Login {
                    email: email.to_string(),
                    password: password.to_string(),
                }
            }
            "logout" => Command::Logout,
            "" | "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "salir" => Command::Quit,
            other => return Err(format!("Comando desconocido: {} (escriba 'help')", other)),
        };
        Ok(command)
    }
}
