// src/services/storage_service.rs

use std::path::PathBuf;

use uuid::Uuid;

use crate::common::error::AppError;

// Teto de 5 MB para avatares, validado antes de qualquer escrita em disco
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// Validação do arquivo de avatar: só imagens, até o teto de tamanho
pub fn validate_avatar(content_type: &str, size_bytes: usize) -> Result<(), AppError> {
    if !content_type.starts_with("image/") {
        return Err(AppError::InvalidUpload(
            "O avatar deve ser uma imagem.".to_string(),
        ));
    }
    if size_bytes > MAX_AVATAR_BYTES {
        return Err(AppError::InvalidUpload(
            "O avatar deve ter no máximo 5 MB.".to_string(),
        ));
    }
    Ok(())
}

// Extrai o nome do arquivo de uma URL pública "/uploads/<arquivo>".
// Qualquer outra forma (subdiretório, travessia, URL externa) é ignorada.
fn stored_file_name(url: &str) -> Option<&str> {
    let name = url.strip_prefix("/uploads/")?;
    if name.is_empty() || name.contains('/') || name.contains("..") {
        return None;
    }
    Some(name)
}

fn extension_for(content_type: &str) -> &str {
    match content_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        // Usa o subtipo cru para formatos menos comuns
        other => other.strip_prefix("image/").unwrap_or("bin"),
    }
}

// Armazena os avatares em disco local; a URL pública sai do ServeDir /uploads
#[derive(Clone)]
pub struct StorageService {
    upload_dir: PathBuf,
}

impl StorageService {
    pub fn new(upload_dir: PathBuf) -> Self {
        Self { upload_dir }
    }

    /// Grava o avatar e devolve a URL pública a persistir no talento
    pub async fn save_avatar(
        &self,
        talent_id: Uuid,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, AppError> {
        validate_avatar(content_type, bytes.len())?;

        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| anyhow::anyhow!("Falha ao criar diretório de upload: {}", e))?;

        let file_name = format!(
            "{}-{}.{}",
            talent_id,
            Uuid::new_v4(),
            extension_for(content_type)
        );
        let path = self.upload_dir.join(&file_name);

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| anyhow::anyhow!("Falha ao gravar avatar: {}", e))?;

        Ok(format!("/uploads/{}", file_name))
    }

    /// Remove do disco um avatar substituído, dada a URL pública persistida.
    /// Melhor esforço: falha aqui não desfaz a troca já gravada no banco.
    pub async fn remove_avatar(&self, url: &str) {
        let Some(file_name) = stored_file_name(url) else {
            return;
        };
        let path = self.upload_dir.join(file_name);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!("Falha ao remover avatar antigo {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_image_mime() {
        assert!(validate_avatar("application/pdf", 100).is_err());
        assert!(validate_avatar("text/html", 100).is_err());
    }

    #[test]
    fn rejects_oversized_image() {
        assert!(validate_avatar("image/png", MAX_AVATAR_BYTES + 1).is_err());
    }

    #[test]
    fn accepts_image_within_limit() {
        assert!(validate_avatar("image/png", 1024).is_ok());
        assert!(validate_avatar("image/jpeg", MAX_AVATAR_BYTES).is_ok());
    }

    #[test]
    fn maps_common_extensions() {
        assert_eq!(extension_for("image/jpeg"), "jpg");
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("image/avif"), "avif");
    }

    #[test]
    fn maps_public_url_to_stored_file() {
        assert_eq!(stored_file_name("/uploads/a-b.png"), Some("a-b.png"));
        assert_eq!(stored_file_name("/uploads/"), None);
        assert_eq!(stored_file_name("/uploads/../segredo"), None);
        assert_eq!(stored_file_name("/uploads/sub/arquivo.png"), None);
        assert_eq!(stored_file_name("https://cdn.exemplo.com/x.png"), None);
    }

    #[tokio::test]
    async fn removes_replaced_avatar_from_disk() {
        let dir = std::env::temp_dir().join(format!("avatars-{}", Uuid::new_v4()));
        let storage = StorageService::new(dir.clone());

        let url = storage
            .save_avatar(Uuid::new_v4(), "image/png", b"png")
            .await
            .unwrap();
        let name = stored_file_name(&url).unwrap();
        assert!(dir.join(name).exists());

        storage.remove_avatar(&url).await;
        assert!(!dir.join(name).exists());

        tokio::fs::remove_dir_all(&dir).await.ok();
    }
}
