use contracts::domain::a001_product::{ProductId, PLACEHOLDER_IMAGE_URL};
use contracts::domain::a003_catalog::{EmptyContext, GalleryState, ProductCard};
use leptos::prelude::*;

use crate::layout::global_context::use_app_context;

/// Карточки для сетки; для загрузки и пустого результата список пуст
fn visible_cards(state: &GalleryState) -> Vec<ProductCard> {
    match state {
        GalleryState::Cards(cards) => cards.clone(),
        _ => Vec::new(),
    }
}

/// Ключ карточки в сетке: правка товара не пересоздаёт соседние карточки
fn card_key(card: &ProductCard) -> ProductId {
    card.id.clone()
}

/// Карточка товара. Поля читаются из общего списка по id,
/// поэтому правка обновляет карточку на месте.
#[component]
fn ProductCardView(id: ProductId, cards: Memo<Vec<ProductCard>>) -> impl IntoView {
    let card = Memo::new(move |_| cards.with(|all| all.iter().find(|c| c.id == id).cloned()));
    let field = move |read: fn(&ProductCard) -> String| {
        move || card.with(|c| c.as_ref().map(read).unwrap_or_default())
    };

    // Не загрузилось: заглушка вместо изображения
    let image_failed = RwSignal::new(false);
    let imagen = Memo::new(move |_| card.with(|c| c.as_ref().map(|c| c.imagen.clone())));
    Effect::new(move |_| {
        imagen.track();
        image_failed.set(false);
    });
    let src = move || {
        if image_failed.get() {
            PLACEHOLDER_IMAGE_URL.to_string()
        } else {
            imagen.get().unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string())
        }
    };

    view! {
        <article class="product-card">
            <div class="product-card__image">
                <img src=src alt=field(|c| c.titulo.clone()) loading="lazy" on:error=move |_| image_failed.set(true) />
            </div>
            <div class="product-card__body">
                <h3 class="product-card__title">{field(|c| c.titulo.clone())}</h3>
                <p class="product-card__description">{field(|c| c.descripcion.clone())}</p>
                <dl class="product-card__meta">
                    <dt>"País:"</dt>
                    <dd>{field(|c| c.pais.clone())}</dd>
                    <dt>"Lanzamiento:"</dt>
                    <dd>{field(|c| c.fecha.clone())}</dd>
                </dl>
                {move || card.with(|c| c.as_ref().and_then(|c| c.plataformas.clone())).map(|tags| view! {
                    <ul class="product-card__platforms">
                        {tags.into_iter().map(|tag| view! { <li class="badge">{tag}</li> }).collect_view()}
                    </ul>
                })}
            </div>
        </article>
    }
}

fn empty_view(context: EmptyContext) -> AnyView {
    view! {
        <div class="gallery-empty">
            <p class="gallery-empty__message">{context.message()}</p>
            {context.hint().map(|hint| view! { <p class="gallery-empty__hint">{hint}</p> })}
        </div>
    }
    .into_any()
}

/// Сетка карточек или сообщение о пустом результате
#[component]
pub fn Gallery() -> impl IntoView {
    let ctx = use_app_context();
    let state = Memo::new(move |_| ctx.gallery());
    let cards = Memo::new(move |_| state.with(visible_cards));

    view! {
        {move || match state.get() {
            GalleryState::Loading => view! {
                <div class="gallery-empty">
                    <div class="spinner"></div>
                    <p>"Cargando catálogo..."</p>
                </div>
            }
            .into_any(),
            GalleryState::Empty(context) => empty_view(context),
            GalleryState::Cards(_) => ().into_any(),
        }}
        <div class="gallery-grid">
            <For
                each=move || cards.get()
                key=card_key
                children=move |card| view! { <ProductCardView id=card.id cards=cards /> }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a003_catalog::{fixture_catalog, ViewSelection};

    fn keys(state: &GalleryState) -> Vec<ProductId> {
        visible_cards(state).iter().map(card_key).collect()
    }

    #[test]
    fn test_edited_card_keeps_its_key() {
        let mut store = fixture_catalog().unwrap();
        let selection = ViewSelection::initial();
        let before = selection.gallery(&store).unwrap();

        let id = keys(&before)[0].clone();
        let (placement, product) = store.find(&id).unwrap();
        let mut product = product.clone();
        product.titulo = "Cyberpunk 2077: Phantom Liberty".into();
        store.replace(placement, product).unwrap();
        let after = selection.gallery(&store).unwrap();

        assert_ne!(before, after);
        assert_eq!(keys(&before), keys(&after));
    }

    #[test]
    fn test_loading_and_empty_have_no_cards() {
        assert!(visible_cards(&GalleryState::Loading).is_empty());
        assert!(visible_cards(&GalleryState::Empty(EmptyContext::NoSearchResults)).is_empty());
    }
}
