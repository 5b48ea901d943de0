//! Command-line parsing.

use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Guillemet non fermé")]
    UnterminatedQuote,

    #[error("Commande inconnue : {0} (tapez « help »)")]
    Unknown(String),

    #[error("Usage : {0}")]
    Usage(&'static str),

    #[error("Champ inconnu : {0}")]
    UnknownField(String),

    #[error("Argument attendu sous la forme clé=valeur : {0}")]
    NotAField(String),
}

/// Splits a line on whitespace. Double quotes group words and are dropped.
pub fn tokenize(line: &str) -> Result<Vec<String>, CommandError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_quotes {
        return Err(CommandError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// `key=value` arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(BTreeMap<String, String>);

impl Fields {
    /// Collects `tokens`, rejecting keys outside `allowed`.
    pub fn parse(tokens: &[String], allowed: &[&str]) -> Result<Self, CommandError> {
        let mut fields = BTreeMap::new();
        for token in tokens {
            let (key, value) = token
                .split_once('=')
                .ok_or_else(|| CommandError::NotAField(token.clone()))?;
            if !allowed.contains(&key) {
                return Err(CommandError::UnknownField(key.to_string()));
            }
            fields.insert(key.to_string(), value.to_string());
        }
        Ok(Self(fields))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value of `key`, or an empty string.
    pub fn text(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }
}

pub const REGISTER_FIELDS: &[&str] = &[
    "email",
    "password",
    "confirm",
    "first_name",
    "last_name",
    "phone",
    "type",
    "ridet",
    "rc",
    "specialties",
];
pub const POST_FIELDS: &[&str] = &[
    "title",
    "description",
    "category",
    "location",
    "budget",
    "urgency",
];
pub const RESPOND_FIELDS: &[&str] = &["message", "price", "duration"];
pub const PROFILE_FIELDS: &[&str] = &["first_name", "last_name", "phone", "description"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Login { email: String, password: String },
    Register(Fields),
    Logout,
    WhoAmI,
    Tab(String),
    Show,
    Post(Fields),
    Respond { index: usize, fields: Fields },
    /// Decide on response `response` of listed request `index`.
    Decide {
        index: usize,
        response: usize,
        decision: String,
    },
    Status { index: usize, status: String },
    Chat(usize),
    Say(String),
    Profile(Fields),
    DeleteAccount,
    Confirm(bool),
    Quit,
}

impl Command {
    /// Command word, for logging. Arguments may hold a password.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Login { .. } => "login",
            Self::Register(_) => "register",
            Self::Logout => "logout",
            Self::WhoAmI => "whoami",
            Self::Tab(_) => "tab",
            Self::Show => "show",
            Self::Post(_) => "post",
            Self::Respond { .. } => "respond",
            Self::Decide { .. } => "decide",
            Self::Status { .. } => "status",
            Self::Chat(_) => "chat",
            Self::Say(_) => "say",
            Self::Profile(_) => "profile",
            Self::DeleteAccount => "delete-account",
            Self::Confirm(_) => "confirm",
            Self::Quit => "quit",
        }
    }

    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        // Message bodies keep their spacing and quotes.
        let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        if head == "say" {
            return Ok(Some(Self::Say(rest.trim().to_string())));
        }

        let tokens = tokenize(line)?;
        let Some((name, args)) = tokens.split_first() else {
            return Ok(None);
        };

        let command = match (name.as_str(), args) {
            ("help" | "?", []) => Self::Help,
            ("login", [email, password]) => Self::Login {
                email: email.clone(),
                password: password.clone(),
            },
            ("login", _) => return Err(CommandError::Usage("login <email> <mot de passe>")),
            ("register", args) => Self::Register(Fields::parse(args, REGISTER_FIELDS)?),
            ("logout", []) => Self::Logout,
            ("whoami", []) => Self::WhoAmI,
            ("tab", [id]) => Self::Tab(id.clone()),
            ("tab", _) => return Err(CommandError::Usage("tab <onglet>")),
            ("show" | "ls", []) => Self::Show,
            ("post", args) => Self::Post(Fields::parse(args, POST_FIELDS)?),
            ("respond", [index, args @ ..]) => Self::Respond {
                index: parse_index(index, "respond <n> message=… price=… duration=…")?,
                fields: Fields::parse(args, RESPOND_FIELDS)?,
            },
            ("respond", []) => {
                return Err(CommandError::Usage(
                    "respond <n> message=… price=… duration=…",
                ));
            }
            ("decide", [index, response, decision]) => Self::Decide {
                index: parse_index(index, DECIDE_USAGE)?,
                response: parse_index(response, DECIDE_USAGE)?,
                decision: decision.clone(),
            },
            ("decide", _) => return Err(CommandError::Usage(DECIDE_USAGE)),
            ("status", [index, status]) => Self::Status {
                index: parse_index(index, STATUS_USAGE)?,
                status: status.clone(),
            },
            ("status", _) => return Err(CommandError::Usage(STATUS_USAGE)),
            ("chat", [index]) => Self::Chat(parse_index(index, "chat <n>")?),
            ("chat", _) => return Err(CommandError::Usage("chat <n>")),
            ("profile", args) => Self::Profile(Fields::parse(args, PROFILE_FIELDS)?),
            ("delete-account", []) => Self::DeleteAccount,
            ("oui" | "yes", []) => Self::Confirm(true),
            ("non" | "no", []) => Self::Confirm(false),
            ("quit" | "exit", []) => Self::Quit,
            (other, _) => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

const DECIDE_USAGE: &str = "decide <n> <réponse> accepte|refuse";
const STATUS_USAGE: &str = "status <n> en_cours|termine|annule";

/// Parses a 1-based position into a 0-based index.
fn parse_index(token: &str, usage: &'static str) -> Result<usize, CommandError> {
    match token.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(CommandError::Usage(usage)),
    }
}

pub const HELP: &str = "\
Commandes :
  login <email> <mot de passe>        se connecter
  register key=value…                 créer un compte (email, password, confirm,
                                      first_name, last_name, phone, type,
                                      ridet, rc, specialties=a,b)
  logout                              se déconnecter
  whoami                              afficher la session
  tab <onglet>                        changer d'onglet
  show                                afficher l'onglet courant
  post key=value…                     publier une demande (title, description,
                                      category, location, budget, urgency)
  respond <n> key=value…              répondre à la demande n (message, price,
                                      duration)
  decide <n> <r> accepte|refuse       décider de la réponse r de la demande n
  status <n> <statut>                 changer le statut de la demande n
  chat <n>                            ouvrir la conversation de la demande n
  say <texte>                         envoyer un message
  profile key=value…                  modifier le profil (first_name, last_name,
                                      phone, description)
  delete-account                      supprimer le compte
  quit                                quitter
Les guillemets regroupent les mots : title=\"Taille de haie\"";

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            tokenize(r#"post title="Taille de haie" budget=12000"#).unwrap(),
            strings(&["post", "title=Taille de haie", "budget=12000"])
        );
        assert_eq!(
            tokenize(r#"profile description="""#).unwrap(),
            strings(&["profile", "description="])
        );
        assert_eq!(
            tokenize(r#"post title="oops"#),
            Err(CommandError::UnterminatedQuote)
        );
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_say_keeps_raw_text() {
        assert_eq!(
            Command::parse(r#"say  Bonjour, "demain" 8h ?"#).unwrap(),
            Some(Command::Say(r#"Bonjour, "demain" 8h ?"#.to_string()))
        );
    }

    #[test]
    fn test_indices_are_one_based() {
        assert_eq!(Command::parse("chat 2").unwrap(), Some(Command::Chat(1)));
        assert_eq!(
            Command::parse("chat 0"),
            Err(CommandError::Usage("chat <n>"))
        );
        assert_eq!(
            Command::parse("decide 1 2 accepte").unwrap(),
            Some(Command::Decide {
                index: 0,
                response: 1,
                decision: "accepte".to_string()
            })
        );
    }

    #[test]
    fn test_respond_fields() {
        let Some(Command::Respond { index, fields }) =
            Command::parse(r#"respond 1 message="Je peux passer" price=9000 duration=2h"#)
                .unwrap()
        else {
            panic!("expected respond");
        };
        assert_eq!(index, 0);
        assert_eq!(fields.get("message"), Some("Je peux passer"));
        assert_eq!(fields.text("price"), "9000");
        assert_eq!(fields.text("missing"), "");
    }

    #[test]
    fn test_rejects_unknown_fields_and_commands() {
        assert_eq!(
            Command::parse("post colour=red"),
            Err(CommandError::UnknownField("colour".to_string()))
        );
        assert_eq!(
            Command::parse("profile Marie"),
            Err(CommandError::NotAField("Marie".to_string()))
        );
        assert_eq!(
            Command::parse("dance"),
            Err(CommandError::Unknown("dance".to_string()))
        );
        assert_eq!(
            Command::parse("login only@email.nc"),
            Err(CommandError::Usage("login <email> <mot de passe>"))
        );
    }

    #[test]
    fn test_confirmation_words() {
        assert_eq!(Command::parse("oui").unwrap(), Some(Command::Confirm(true)));
        assert_eq!(Command::parse("non").unwrap(), Some(Command::Confirm(false)));
    }
}
