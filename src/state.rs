use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "ssr")] {
        use axum::extract::FromRef;
        use leptos::prelude::LeptosOptions;
        use serde::Serialize;
        use std::sync::Arc;

        use crate::auth::AuthSettings;
        use crate::config::AppConfig;
        use crate::services::{
            AnalyticsService, ContentSearch, ContentStore, OpenAiChatModel, OpenAiEmbedder,
            RagPipeline, SupabaseChatLogStore, SupabaseContentSearch, SupabaseContentStore,
        };
        use crate::supabase::build_client;

        /// Which settings were present at startup, as reported by `/api/health`.
        #[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
        #[serde(rename_all = "camelCase")]
        pub struct EnvironmentCheck {
            pub supabase_url: bool,
            pub supabase_key: bool,
            pub openai_key: bool,
        }

        impl EnvironmentCheck {
            pub fn from_config(config: &AppConfig) -> Self {
                Self {
                    supabase_url: !config.supabase_url.is_empty(),
                    supabase_key: !config.supabase_key.is_empty(),
                    openai_key: !config.openai_api_key.is_empty(),
                }
            }
        }

        #[derive(FromRef, Clone)]
        pub struct ApiState {
            pub rag: Arc<RagPipeline>,
            pub analytics: Arc<AnalyticsService>,
            pub search: Arc<dyn ContentSearch>,
            pub contents: Arc<dyn ContentStore>,
            pub auth: Arc<AuthSettings>,
            pub environment: EnvironmentCheck,
        }

        impl ApiState {
            pub fn from_config(config: &AppConfig) -> Self {
                let supabase = build_client(&config.supabase_url, &config.supabase_key);

                let search: Arc<dyn ContentSearch> =
                    Arc::new(SupabaseContentSearch::new(supabase.clone()));
                let logs = Arc::new(SupabaseChatLogStore::new(supabase.clone()));

                let rag = RagPipeline::new(
                    Arc::new(OpenAiEmbedder::new(&config.openai_api_key, config.embedding_model.clone())),
                    search.clone(),
                    Arc::new(OpenAiChatModel::new(&config.openai_api_key, config.chat_model.clone())),
                    logs.clone(),
                    config.search,
                );

                Self {
                    rag: Arc::new(rag),
                    analytics: Arc::new(AnalyticsService::new(logs)),
                    search,
                    contents: Arc::new(SupabaseContentStore::new(supabase)),
                    auth: Arc::new(AuthSettings::from_config(config)),
                    environment: EnvironmentCheck::from_config(config),
                }
            }
        }

        #[derive(FromRef, Clone)]
        pub struct AppState {
            pub leptos_options: LeptosOptions,
            pub api: ApiState,
        }

        impl AppState {
            pub fn new(leptos_options: LeptosOptions, api: ApiState) -> Self {
                Self { leptos_options, api }
            }
        }
    }
}
