use contracts::domain::a001_product::{ImageSource, ProductForm, ProductId, UploadLimits};
use contracts::domain::a002_category::{categories, SubcategoryDef};
use contracts::domain::a003_catalog::CatalogEntry;
use contracts::domain::common::{FormField, ValidationErrors};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::model;
use crate::system::auth::context::{current_token, forget_expired_session, AuthState};

/// ViewModel формы товара
#[derive(Clone, Copy)]
pub struct ProductDetailsViewModel {
    pub form: RwSignal<ProductForm>,
    /// Изображение редактируется отдельно, через `ImageSourcePicker`
    pub image: RwSignal<Option<ImageSource>>,
    pub errors: RwSignal<ValidationErrors>,
    pub error: RwSignal<Option<String>>,
    pub notice: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    pub editing: RwSignal<Option<ProductId>>,
    pub platform_input: RwSignal<String>,
}

impl ProductDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(ProductForm::default()),
            image: RwSignal::new(None),
            errors: RwSignal::new(ValidationErrors::new()),
            error: RwSignal::new(None),
            notice: RwSignal::new(None),
            saving: RwSignal::new(false),
            editing: RwSignal::new(None),
            platform_input: RwSignal::new(String::new()),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.editing.with(Option::is_some)
    }

    pub fn field_error(&self, field: FormField) -> Option<String> {
        self.errors.with(|e| e.for_field(field).map(str::to_string))
    }

    /// Подвкладки выбранной категории; `None` для плоской
    pub fn subcategories(&self) -> Option<&'static [SubcategoryDef]> {
        let category = self.form.with(|f| f.category.clone());
        categories()
            .find(|c| c.key == category)
            .and_then(|c| c.subcategories)
    }

    /// Поле платформ показывается только для категорий, где они есть
    pub fn offers_platforms(&self) -> bool {
        let category = self.form.with(|f| f.category.clone());
        categories().any(|c| c.key == category && c.offers_platforms)
    }

    pub fn set_category(&self, category: &str) {
        self.form.update(|f| {
            f.set_category(category);
            if !categories().any(|c| c.key == category && c.offers_platforms) {
                f.plataformas.clear();
            }
        });
    }

    pub fn add_platform_command(&self) {
        let value = self.platform_input.get_untracked();
        let mut added = false;
        self.form.update(|f| added = f.add_platform(&value));
        if added {
            self.platform_input.set(String::new());
        }
    }

    pub fn remove_platform(&self, platform: &str) {
        self.form.update(|f| f.remove_platform(platform));
    }

    /// Загрузить товар из каталога в форму
    pub fn start_edit(&self, entry: &CatalogEntry) {
        let form = ProductForm::from_product(&entry.placement, &entry.product);
        self.image.set(form.image.clone());
        self.form.set(form);
        self.editing.set(Some(entry.product.id.clone()));
        self.errors.set(ValidationErrors::new());
        self.error.set(None);
        self.notice.set(None);
    }

    pub fn reset(&self) {
        self.form.set(ProductForm::default());
        self.image.set(None);
        self.editing.set(None);
        self.errors.set(ValidationErrors::new());
        self.error.set(None);
        self.platform_input.set(String::new());
    }

    /// Проверить форму и отправить. При ошибках запрос не уходит.
    pub fn save_command(
        &self,
        auth_state: ReadSignal<AuthState>,
        set_auth_state: WriteSignal<AuthState>,
        on_saved: Callback<()>,
    ) {
        if self.saving.get_untracked() {
            return;
        }
        self.error.set(None);
        self.notice.set(None);

        let mut current = self.form.get_untracked();
        current.image = self.image.get_untracked();
        let product = match current.submit(&UploadLimits::default()) {
            Ok(product) => product,
            Err(errors) => {
                self.errors.set(errors);
                return;
            }
        };
        self.errors.set(ValidationErrors::new());

        let token = match current_token(auth_state) {
            Ok(token) => token,
            Err(e) => {
                self.error.set(Some(e));
                return;
            }
        };

        let editing = self.editing.get_untracked();
        let dto = product.to_dto(editing.as_ref());
        let vm = *self;
        vm.saving.set(true);
        spawn_local(async move {
            let result = match &editing {
                Some(id) => model::update_product(id, &dto, &token).await,
                None => model::create_product(&dto, &token).await.map(|_| ()),
            };
            match result {
                Ok(()) => {
                    let message = if editing.is_some() {
                        "Producto actualizado"
                    } else {
                        "Producto agregado"
                    };
                    vm.reset();
                    vm.notice.set(Some(message.to_string()));
                    on_saved.run(());
                }
                Err(e) => {
                    forget_expired_session(&e, set_auth_state);
                    vm.error.set(Some(e));
                }
            }
            vm.saving.set(false);
        });
    }
}
