use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `curriculos` table. Column and wire names are the table's own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Curriculo {
    pub id: i32,
    #[serde(rename = "nome")]
    #[sqlx(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    #[sqlx(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "formacao")]
    #[sqlx(rename = "formacao")]
    pub education: String,
    #[serde(rename = "experiencia")]
    #[sqlx(rename = "experiencia")]
    pub experience: String,
}

/// Request body for create and update: every field except the server-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculoInput {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "formacao")]
    pub education: String,
    #[serde(rename = "experiencia")]
    pub experience: String,
}

#[cfg(test)]
impl Curriculo {
    pub fn from_input(id: i32, input: &CurriculoInput) -> Self {
        Curriculo {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            education: input.education.clone(),
            experience: input.experience.clone(),
        }
    }
}
