//! Usuario, the single record managed by the backend.
//!
//! A named item carrying a calendar date split into day, month and year, a
//! free-text priority, an optional image (usually a `data:` URL) and a
//! description. No field is mandatory: text fields may be absent and the
//! date parts default to zero. Calendar semantics are not enforced.

use serde::{Deserialize, Deserializer, Serialize};

use crate::id::UsuarioId;

/// A stored (or about to be stored) record.
///
/// `id` is `None` until the storage layer assigns one on creation.
/// Serialized with camelCase keys, so `url_da_imagem` travels as `urlDaImagem`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    #[serde(default)]
    pub id: Option<UsuarioId>,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub dia: i32,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub mes: i32,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub ano: i32,
    #[serde(default)]
    pub prioridade: Option<String>,
    #[serde(default)]
    pub url_da_imagem: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
}

/// Date parts accept `null` and read it as `0`, same as an absent key.
fn null_as_zero<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i32>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Usuario {
    /// Create a builder for constructing a [`Usuario`].
    #[must_use]
    pub fn builder() -> UsuarioBuilder {
        UsuarioBuilder::default()
    }

    /// Return the same record with its identifier replaced.
    #[must_use]
    pub fn with_id(mut self, id: UsuarioId) -> Self {
        self.id = Some(id);
        self
    }

    /// Return the same record with its identifier cleared.
    #[must_use]
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }
}

/// Step-by-step builder for [`Usuario`].
#[derive(Debug, Default)]
pub struct UsuarioBuilder {
    inner: Usuario,
}

impl UsuarioBuilder {
    #[must_use]
    pub fn nome(mut self, nome: impl Into<String>) -> Self {
        self.inner.nome = Some(nome.into());
        self
    }

    /// Set day, month and year at once.
    #[must_use]
    pub fn data(mut self, dia: i32, mes: i32, ano: i32) -> Self {
        self.inner.dia = dia;
        self.inner.mes = mes;
        self.inner.ano = ano;
        self
    }

    #[must_use]
    pub fn prioridade(mut self, prioridade: impl Into<String>) -> Self {
        self.inner.prioridade = Some(prioridade.into());
        self
    }

    #[must_use]
    pub fn url_da_imagem(mut self, url: impl Into<String>) -> Self {
        self.inner.url_da_imagem = Some(url.into());
        self
    }

    #[must_use]
    pub fn descricao(mut self, descricao: impl Into<String>) -> Self {
        self.inner.descricao = Some(descricao.into());
        self
    }

    /// Consume the builder and return the [`Usuario`].
    #[must_use]
    pub fn build(self) -> Usuario {
        self.inner
    }
}
