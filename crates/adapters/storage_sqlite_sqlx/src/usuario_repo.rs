//! `SQLite` implementation of [`UsuarioRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use usuarios_app::ports::UsuarioRepository;
use usuarios_domain::error::UsuariosError;
use usuarios_domain::id::UsuarioId;
use usuarios_domain::usuario::Usuario;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Usuario`].
struct Wrapper(Usuario);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;

        Ok(Self(Usuario {
            id: Some(UsuarioId::new(id)),
            nome: row.try_get("nome")?,
            dia: row.try_get("dia")?,
            mes: row.try_get("mes")?,
            ano: row.try_get("ano")?,
            prioridade: row.try_get("prioridade")?,
            url_da_imagem: row.try_get("url_da_imagem")?,
            descricao: row.try_get("descricao")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO usuarios (nome, dia, mes, ano, prioridade, url_da_imagem, descricao) VALUES (?, ?, ?, ?, ?, ?, ?)";
const UPSERT: &str = "INSERT INTO usuarios (id, nome, dia, mes, ano, prioridade, url_da_imagem, descricao) VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
     ON CONFLICT(id) DO UPDATE SET nome = excluded.nome, dia = excluded.dia, mes = excluded.mes, ano = excluded.ano, \
     prioridade = excluded.prioridade, url_da_imagem = excluded.url_da_imagem, descricao = excluded.descricao";
const SELECT_ALL: &str = "SELECT * FROM usuarios ORDER BY id";
const DELETE_BY_ID: &str = "DELETE FROM usuarios WHERE id = ?";

/// `SQLite`-backed usuario repository.
pub struct SqliteUsuarioRepository {
    pool: SqlitePool,
}

impl SqliteUsuarioRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UsuarioRepository for SqliteUsuarioRepository {
    fn find_all(&self) -> impl Future<Output = Result<Vec<Usuario>, UsuariosError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn save(
        &self,
        usuario: Usuario,
    ) -> impl Future<Output = Result<Usuario, UsuariosError>> + Send {
        let pool = self.pool.clone();
        async move {
            let id = match usuario.id {
                Some(id) => {
                    sqlx::query(UPSERT)
                        .bind(id.get())
                        .bind(&usuario.nome)
                        .bind(usuario.dia)
                        .bind(usuario.mes)
                        .bind(usuario.ano)
                        .bind(&usuario.prioridade)
                        .bind(&usuario.url_da_imagem)
                        .bind(&usuario.descricao)
                        .execute(&pool)
                        .await
                        .map_err(StorageError::from)?;
                    id
                }
                None => {
                    let result = sqlx::query(INSERT)
                        .bind(&usuario.nome)
                        .bind(usuario.dia)
                        .bind(usuario.mes)
                        .bind(usuario.ano)
                        .bind(&usuario.prioridade)
                        .bind(&usuario.url_da_imagem)
                        .bind(&usuario.descricao)
                        .execute(&pool)
                        .await
                        .map_err(StorageError::from)?;
                    UsuarioId::new(result.last_insert_rowid())
                }
            };

            Ok(usuario.with_id(id))
        }
    }

    fn delete_by_id(
        &self,
        id: UsuarioId,
    ) -> impl Future<Output = Result<(), UsuariosError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                tracing::debug!(%id, "delete matched no usuario");
            }
            Ok(())
        }
    }
}
