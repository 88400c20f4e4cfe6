use contracts::domain::a001_product::UploadKind;
use contracts::domain::a002_category::categories;
use contracts::domain::common::FormField;
use leptos::ev;
use leptos::prelude::*;

use super::view_model::ProductDetailsViewModel;
use crate::shared::icons::icon;
use crate::shared::image_picker::ImageSourcePicker;
use crate::system::auth::context::use_auth;

fn field_error_view(vm: ProductDetailsViewModel, field: FormField) -> impl IntoView {
    move || {
        vm.field_error(field)
            .map(|message| view! { <span class="field-error">{message}</span> })
    }
}

#[component]
pub fn ProductDetails(vm: ProductDetailsViewModel, on_saved: Callback<()>) -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        vm.save_command(auth_state, set_auth_state, on_saved);
    };

    let on_platform_key = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            vm.add_platform_command();
        }
    };

    view! {
        <form class="details-form product-form" on:submit=on_submit>
            <h3 class="admin-section__title">
                {move || if vm.is_edit_mode() { "Editar Producto" } else { "Agregar Nuevo Producto" }}
            </h3>

            {move || vm.error.get().map(|e| view! { <div class="warning-box">{e}</div> })}
            {move || vm.notice.get().map(|n| view! { <div class="success-box">{n}</div> })}

            <div class="form-row">
                <div class="form-group">
                    <label for="product-category">"Categoría"</label>
                    <select
                        id="product-category"
                        class="form-input"
                        prop:value=move || vm.form.with(|f| f.category.clone())
                        on:change=move |ev| vm.set_category(&event_target_value(&ev))
                    >
                        <option value="">"Selecciona una categoría"</option>
                        {categories()
                            .map(|c| view! { <option value=c.key>{c.label}</option> })
                            .collect_view()}
                    </select>
                    {field_error_view(vm, FormField::Category)}
                </div>

                {move || vm.subcategories().map(|subs| view! {
                    <div class="form-group">
                        <label for="product-subcategory">"Subcategoría"</label>
                        <select
                            id="product-subcategory"
                            class="form-input"
                            prop:value=move || vm.form.with(|f| f.subcategory.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                vm.form.update(|f| f.subcategory = value);
                            }
                        >
                            <option value="">"Selecciona una subcategoría"</option>
                            {subs
                                .iter()
                                .map(|s| view! { <option value=s.key>{s.label}</option> })
                                .collect_view()}
                        </select>
                        {field_error_view(vm, FormField::Subcategory)}
                    </div>
                })}
            </div>

            <div class="form-group">
                <label for="product-title">"Título"</label>
                <input
                    type="text"
                    id="product-title"
                    class="form-input"
                    placeholder="Título del producto"
                    prop:value=move || vm.form.with(|f| f.titulo.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        vm.form.update(|f| f.titulo = value);
                    }
                />
                {field_error_view(vm, FormField::Title)}
            </div>

            <div class="form-group">
                <label for="product-description">"Descripción"</label>
                <textarea
                    id="product-description"
                    class="form-input"
                    rows="3"
                    placeholder="Descripción del producto"
                    prop:value=move || vm.form.with(|f| f.descripcion.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        vm.form.update(|f| f.descripcion = value);
                    }
                ></textarea>
                {field_error_view(vm, FormField::Description)}
            </div>

            <ImageSourcePicker
                source=vm.image
                kind=UploadKind::ProductImage
                field_error=Signal::derive(move || vm.field_error(FormField::Image))
            />

            <div class="form-row">
                <div class="form-group">
                    <label for="product-country">"País"</label>
                    <input
                        type="text"
                        id="product-country"
                        class="form-input"
                        placeholder="País de origen"
                        prop:value=move || vm.form.with(|f| f.pais.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            vm.form.update(|f| f.pais = value);
                        }
                    />
                    {field_error_view(vm, FormField::Country)}
                </div>

                <div class="form-group">
                    <label for="product-date">"Fecha de Lanzamiento"</label>
                    <input
                        type="date"
                        id="product-date"
                        class="form-input"
                        prop:value=move || vm.form.with(|f| f.fecha_lanzamiento.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            vm.form.update(|f| f.fecha_lanzamiento = value);
                        }
                    />
                    {field_error_view(vm, FormField::ReleaseDate)}
                </div>
            </div>

            <Show when=move || vm.offers_platforms()>
                <div class="form-group">
                    <label for="product-platform">"Plataformas"</label>
                    <div class="platform-input">
                        <input
                            type="text"
                            id="product-platform"
                            class="form-input"
                            placeholder="Ej: PC, PS5, Xbox"
                            prop:value=move || vm.platform_input.get()
                            on:input=move |ev| vm.platform_input.set(event_target_value(&ev))
                            on:keydown=on_platform_key
                        />
                        <button
                            type="button"
                            class="button button--secondary"
                            on:click=move |_| vm.add_platform_command()
                        >
                            {icon("plus")}
                        </button>
                    </div>
                    <div class="platform-tags">
                        <For
                            each=move || vm.form.with(|f| f.plataformas.clone())
                            key=|p| p.clone()
                            children=move |platform| {
                                let label = platform.clone();
                                view! {
                                    <span class="platform-tag">
                                        {label}
                                        <button
                                            type="button"
                                            class="platform-tag__remove"
                                            on:click=move |_| vm.remove_platform(&platform)
                                        >
                                            {icon("x")}
                                        </button>
                                    </span>
                                }
                            }
                        />
                    </div>
                    {field_error_view(vm, FormField::Platforms)}
                </div>
            </Show>

            <div class="form-actions">
                <button type="submit" class="button button--primary" disabled=move || vm.saving.get()>
                    {icon("save")}
                    {move || match (vm.saving.get(), vm.is_edit_mode()) {
                        (true, _) => "Guardando...",
                        (false, true) => "Guardar Cambios",
                        (false, false) => "Agregar Producto",
                    }}
                </button>
                <Show when=move || vm.is_edit_mode()>
                    <button type="button" class="button button--secondary" on:click=move |_| vm.reset()>
                        "Cancelar"
                    </button>
                </Show>
            </div>
        </form>
    }
}
