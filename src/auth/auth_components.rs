use leptos::prelude::*;

use crate::auth::{context::use_admin, AdminLogin, AdminLogout};

#[component]
pub fn AdminLoginForm() -> impl IntoView {
    let login_action = ServerAction::<AdminLogin>::new();
    let (password, set_password) = signal(String::new());
    let pending = login_action.pending();
    let admin = use_admin();

    Effect::new(move |_| {
        if let Some(Ok(())) = login_action.value().get() {
            set_password.set(String::new());
            if let Some(admin) = admin {
                admin.refresh_session();
            }
        }
    });

    let error_message = move || {
        login_action
            .value()
            .get()
            .and_then(|result| result.err())
            .map(|_| "비밀번호가 올바르지 않습니다.".to_string())
    };

    view! {
        <div class="min-h-screen bg-gray-50 flex items-center justify-center">
            <div class="max-w-md w-full bg-white rounded-lg shadow-md p-6">
                <h2 class="text-2xl font-bold text-center text-gray-800 mb-6">
                    "🛡️ 관리자 로그인"
                </h2>
                <form
                    class="space-y-4"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        login_action.dispatch(AdminLogin { password: password.get() });
                    }
                >
                    <input
                        type="password"
                        placeholder="비밀번호를 입력하세요"
                        class="w-full px-4 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    {move || {
                        error_message()
                            .map(|msg| view! { <p class="text-sm text-red-600">{msg}</p> })
                    }}
                    <button
                        type="submit"
                        class="w-full px-4 py-2 bg-blue-600 text-white rounded-md hover:bg-blue-700 disabled:opacity-50 transition-colors"
                        disabled=move || pending.get()
                    >
                        {move || if pending.get() { "확인 중..." } else { "로그인" }}
                    </button>
                </form>
                <div class="mt-6 text-center">
                    <a href="/" class="text-sm text-blue-600 hover:text-blue-800">
                        "메인으로 돌아가기"
                    </a>
                </div>
            </div>
        </div>
    }
    .into_any()
}

#[component]
pub fn LogoutButton() -> impl IntoView {
    let logout_action = ServerAction::<AdminLogout>::new();
    let admin = use_admin();

    Effect::new(move |_| {
        if logout_action.value().get().is_some() {
            if let Some(admin) = admin {
                admin.refresh_session();
            }
        }
    });

    view! {
        <button
            on:click=move |_| {
                logout_action.dispatch(AdminLogout {});
            }
            class="px-3 py-1 text-sm bg-red-50 hover:bg-red-100 text-red-600 rounded-md transition-colors"
        >
            "로그아웃"
        </button>
    }
    .into_any()
}

/// Renders `children` for an admin session, the login form otherwise.
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let admin = use_admin();

    move || match admin {
        Some(admin) if admin.is_loading.get() && !admin.is_admin.get() => view! {
            <div class="min-h-screen bg-gray-50 flex items-center justify-center">
                <div class="text-gray-600">"세션 확인 중..."</div>
            </div>
        }
        .into_any(),
        Some(admin) if admin.is_admin.get() => children().into_any(),
        _ => view! { <AdminLoginForm /> }.into_any(),
    }
}
