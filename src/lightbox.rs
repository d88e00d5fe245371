//! Click-to-zoom overlay for campaign images.
//!
//! Views announce what they rendered through `RenderNotice` values; the page
//! shell hands the collected notices to `decorate`, which appends the
//! overlay and its wiring exactly once when some view produced zoomable
//! images. This replaces the original site's MutationObserver re-binding:
//! there is no subtree watching, only an explicit render-completed signal.

/// Published by a view builder after it finishes rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderNotice {
    /// The view emitted `.campaign-image` / `.campaign-header-image`
    /// containers that should zoom on click.
    CampaignImages,
}

/// Marker attribute used by the wiring as a capability check: an image
/// container that already carries it is never bound a second time.
pub const BOUND_ATTR: &str = "data-lightbox-bound";

/// Append the lightbox overlay and wiring to a fully rendered page if any
/// view announced campaign images. Safe to call with an empty notice list.
pub fn decorate(html: &mut String, notices: &[RenderNotice]) {
    if !notices.contains(&RenderNotice::CampaignImages) {
        return;
    }
    html.push_str(OVERLAY_MARKUP);
    html.push_str(&wiring_script());
}

const OVERLAY_MARKUP: &str = r#"
<div class="image-lightbox" id="imageLightbox">
    <button class="lightbox-close" aria-label="Close" title="Đóng (ESC)">✕</button>
    <div class="lightbox-content">
        <img src="" alt="" id="lightboxImage">
    </div>
    <div class="lightbox-caption" id="lightboxCaption" style="display:none"></div>
</div>"#;

fn wiring_script() -> String {
    format!(
        "<script>\
\n(function(){{\
\n'use strict';\
\nvar lightbox=document.getElementById('imageLightbox');\
\nvar image=document.getElementById('lightboxImage');\
\nvar caption=document.getElementById('lightboxCaption');\
\nfunction open(src,alt){{\
\n    image.src=src;image.alt=alt;\
\n    if(alt&&alt.trim()){{caption.textContent=alt;caption.style.display='block';}}\
\n    else{{caption.style.display='none';}}\
\n    lightbox.classList.add('active');\
\n    document.body.style.overflow='hidden';\
\n}}\
\nfunction close(){{\
\n    lightbox.classList.remove('active');\
\n    document.body.style.overflow='';\
\n    setTimeout(function(){{\
\n        if(!lightbox.classList.contains('active')){{image.src='';image.alt='';}}\
\n    }},300);\
\n}}\
\nlightbox.querySelector('.lightbox-close').addEventListener('click',function(e){{\
\n    e.stopPropagation();close();\
\n}});\
\nlightbox.addEventListener('click',function(e){{\
\n    if(e.target===lightbox||e.target.classList.contains('lightbox-content'))close();\
\n}});\
\ndocument.addEventListener('keydown',function(e){{\
\n    if(e.key==='Escape'&&lightbox.classList.contains('active'))close();\
\n}});\
\nimage.addEventListener('click',function(e){{e.stopPropagation();}});\
\ndocument.querySelectorAll('.campaign-image, .campaign-header-image').forEach(function(container){{\
\n    if(container.hasAttribute('{bound}'))return;\
\n    var img=container.querySelector('img');\
\n    if(!img)return;\
\n    container.setAttribute('{bound}','');\
\n    container.style.cursor='pointer';\
\n    container.addEventListener('click',function(e){{\
\n        if(e.target===container||e.target===img){{\
\n            e.preventDefault();\
\n            open(img.src,img.alt);\
\n        }}\
\n    }});\
\n}});\
\n}})();\
\n</script>",
        bound = BOUND_ATTR,
    )
}
